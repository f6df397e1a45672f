use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

use super::types::ApiError;
use crate::model::types::{Franchise, Starship};
use crate::storage::gateway::StarshipRepository;

pub async fn get_all_starships(
    Extension(repository): Extension<Arc<dyn StarshipRepository>>,
) -> Result<Json<Vec<Starship>>, ApiError> {
    match repository.find_all().await {
        Ok(starships) => Ok(Json(starships)),
        Err(e) => {
            tracing::error!("Failed to list starships: {}", e);
            Err(ApiError::internal("failed to read starships"))
        }
    }
}

pub async fn get_starships_by_franchise(
    Path(franchise): Path<String>,
    Extension(repository): Extension<Arc<dyn StarshipRepository>>,
) -> Result<Json<Vec<Starship>>, ApiError> {
    let franchise: Franchise = match franchise.parse() {
        Ok(franchise) => franchise,
        Err(e) => {
            tracing::warn!("Rejected franchise path segment: {}", e);
            return Err(ApiError::bad_request(e.to_string()));
        }
    };

    match repository.find_all_by_franchise(franchise).await {
        Ok(starships) => Ok(Json(starships)),
        Err(e) => {
            tracing::error!("Failed to list starships for {}: {}", franchise, e);
            Err(ApiError::internal("failed to read starships"))
        }
    }
}

pub async fn add_starship(
    Extension(repository): Extension<Arc<dyn StarshipRepository>>,
    Json(starship): Json<Starship>,
) -> Result<(StatusCode, Json<Starship>), ApiError> {
    if let Err(e) = starship.validate() {
        tracing::warn!("Rejected starship body: {}", e);
        return Err(ApiError::bad_request(e.to_string()));
    }

    match repository.save(starship).await {
        Ok(saved) => Ok((StatusCode::CREATED, Json(saved))),
        Err(e) => {
            tracing::error!("Failed to save starship: {}", e);
            Err(ApiError::internal("failed to save starship"))
        }
    }
}

pub async fn get_all_class_names(
    Extension(repository): Extension<Arc<dyn StarshipRepository>>,
) -> Result<Json<Vec<String>>, ApiError> {
    match repository.find_all().await {
        Ok(starships) => Ok(Json(
            starships.into_iter().map(|s| s.class_name).collect(),
        )),
        Err(e) => {
            tracing::error!("Failed to list class names: {}", e);
            Err(ApiError::internal("failed to read starships"))
        }
    }
}
