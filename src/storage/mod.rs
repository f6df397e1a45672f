//! Persistence Gateway Module
//!
//! Interface over the document store holding starship records.
//!
//! ## Core Concepts
//! - **Gateway**: `StarshipRepository` is the only surface the HTTP layer sees:
//!   whole-collection scan, franchise-filtered scan, and single-record upsert.
//! - **Cosmos backend**: `CosmosClient` talks to the Cosmos DB REST API with
//!   master-key request signing; `CosmosStarshipRepository` builds the SQL
//!   queries and upserts against the `starships` container.
//! - **In-memory backend**: `InMemoryStarshipRepository` is a substitutable
//!   implementation backing the handler tests, with the same id-assignment
//!   semantics as the Cosmos one.

pub mod cosmos;
pub mod gateway;
pub mod memory;
pub mod protocol;
