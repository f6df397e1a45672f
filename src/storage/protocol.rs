//! Cosmos DB REST Wire Protocol
//!
//! Defines the request and response bodies exchanged with the Cosmos DB
//! REST API: container creation properties (partition key and indexing
//! policy), parameterized SQL queries, and document feed pages.
//!
//! Field names follow the Cosmos wire format, hence the camelCase and
//! PascalCase renames.

use serde::{Deserialize, Serialize};

/// REST API version sent as `x-ms-version` with every request.
pub const COSMOS_API_VERSION: &str = "2018-12-31";

/// Properties of a container to create, as accepted by the collections
/// endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerProperties {
    pub id: String,
    #[serde(rename = "partitionKey")]
    pub partition_key: PartitionKeyDefinition,
    #[serde(rename = "indexingPolicy")]
    pub indexing_policy: IndexingPolicy,
}

/// Partition key definition. A single hash-partitioned path for this service.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionKeyDefinition {
    pub paths: Vec<String>,
    pub kind: String,
}

/// Indexing policy restricting which document paths get indexed.
///
/// The provisioner indexes only the three queried paths and excludes
/// everything else, including the `_etag` change-tracking metadata.
#[derive(Debug, Clone, Serialize)]
pub struct IndexingPolicy {
    #[serde(rename = "indexingMode")]
    pub indexing_mode: String,
    pub automatic: bool,
    #[serde(rename = "includedPaths")]
    pub included_paths: Vec<IndexPath>,
    #[serde(rename = "excludedPaths")]
    pub excluded_paths: Vec<IndexPath>,
}

/// A single included or excluded index path.
#[derive(Debug, Clone, Serialize)]
pub struct IndexPath {
    pub path: String,
}

/// A parameterized SQL query posted to a container's documents endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SqlQuery {
    pub query: String,
    pub parameters: Vec<SqlParameter>,
}

impl SqlQuery {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: &str, value: serde_json::Value) -> Self {
        self.parameters.push(SqlParameter {
            name: name.to_string(),
            value,
        });
        self
    }
}

/// A named query parameter (`@name`).
#[derive(Debug, Clone, Serialize)]
pub struct SqlParameter {
    pub name: String,
    pub value: serde_json::Value,
}

/// One page of a document feed response. Continuation across pages is
/// carried in the `x-ms-continuation` header, not the body.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
pub struct DocumentPage<T> {
    #[serde(rename = "Documents", default)]
    pub documents: Vec<T>,
}
