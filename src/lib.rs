//! Starship Catalog Service Library
//!
//! This library crate defines the core modules of a small REST service that
//! stores starship records in Azure Cosmos DB. It serves as the foundation
//! for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The service is composed of four loosely coupled subsystems:
//!
//! - **`model`**: The record types. A `Starship` document with a closed
//!   `Franchise` enumeration that doubles as the container partition key.
//! - **`storage`**: The persistence gateway. A `StarshipRepository` trait with
//!   a Cosmos DB REST-backed implementation and an in-memory one for tests.
//! - **`provisioning`**: The startup provisioner. Ensures the database and the
//!   `starships` container exist (partition key, indexing policy, throughput)
//!   before the service accepts traffic, failing fast on anything unexpected.
//! - **`api`**: The HTTP layer. Four Axum routes mapping directly onto the
//!   repository operations.

pub mod api;
pub mod config;
pub mod model;
pub mod provisioning;
pub mod storage;
