//! HTTP API Module
//!
//! Four routes under `/api/starship`, each a thin translation onto the
//! persistence gateway:
//!
//! - `GET  /api/starship` — all records.
//! - `GET  /api/starship/classNames` — class names of all records.
//! - `GET  /api/starship/:franchise` — records of one franchise; 400 on an
//!   unrecognized value.
//! - `POST /api/starship` — validate and upsert one record; 201 with the
//!   persisted record.
//!
//! The static `classNames` segment takes precedence over the `:franchise`
//! parameter in route matching. Only the POST route mutates state.

pub mod handlers;
pub mod types;


use axum::{Extension, Router, routing::get};
use std::sync::Arc;

use crate::storage::gateway::StarshipRepository;

/// Builds the service router with the repository injected as an extension.
pub fn router(repository: Arc<dyn StarshipRepository>) -> Router {
    Router::new()
        .route(
            "/api/starship",
            get(handlers::get_all_starships).post(handlers::add_starship),
        )
        .route("/api/starship/classNames", get(handlers::get_all_class_names))
        .route("/api/starship/:franchise", get(handlers::get_starships_by_franchise))
        .layer(Extension(repository))
}
