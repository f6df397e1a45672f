use anyhow::{Result, bail};
use async_trait::async_trait;
use std::sync::Arc;

use crate::storage::cosmos::CONTAINER_NAME;
use crate::storage::protocol::{
    ContainerProperties, IndexPath, IndexingPolicy, PartitionKeyDefinition,
};

/// Partition key path of the `starships` container.
pub const PARTITION_KEY_PATH: &str = "/franchise";

/// Autoscale throughput ceiling requested when creating the container.
pub const MAX_THROUGHPUT: u32 = 4000;

/// The two create-if-not-exists operations the provisioner needs from the
/// store. `CosmosClient` implements this; tests script the status codes.
#[async_trait]
pub trait ProvisioningStore: Send + Sync {
    async fn create_database_if_not_exists(&self, database: &str) -> Result<u16>;

    async fn create_container_if_not_exists(
        &self,
        database: &str,
        properties: &ContainerProperties,
        max_throughput: u32,
    ) -> Result<u16>;
}

/// Startup provisioner for the database and container.
///
/// Runs exactly once, synchronously, before the service binds its listener.
pub struct Provisioner {
    store: Arc<dyn ProvisioningStore>,
    database: String,
}

impl Provisioner {
    pub fn new(store: Arc<dyn ProvisioningStore>, database: String) -> Self {
        Self { store, database }
    }

    /// The fixed properties of the `starships` container: hash partition on
    /// `/franchise`, and an indexing policy that indexes the three queried
    /// paths while excluding `_etag` and everything else.
    pub fn container_properties() -> ContainerProperties {
        ContainerProperties {
            id: CONTAINER_NAME.to_string(),
            partition_key: PartitionKeyDefinition {
                paths: vec![PARTITION_KEY_PATH.to_string()],
                kind: "Hash".to_string(),
            },
            indexing_policy: IndexingPolicy {
                indexing_mode: "consistent".to_string(),
                automatic: true,
                included_paths: vec![
                    IndexPath {
                        path: "/franchise/?".to_string(),
                    },
                    IndexPath {
                        path: "/name/?".to_string(),
                    },
                    IndexPath {
                        path: "/className/?".to_string(),
                    },
                ],
                excluded_paths: vec![
                    IndexPath {
                        path: "/\"_etag\"/?".to_string(),
                    },
                    IndexPath {
                        path: "/*".to_string(),
                    },
                ],
            },
        }
    }

    /// Runs the two-step idempotent setup. Any status other than 200 or 201
    /// on either step is an unrecoverable startup failure.
    pub async fn provision(&self) -> Result<()> {
        tracing::info!("Provisioning Cosmos DB database {}", self.database);

        match self
            .store
            .create_database_if_not_exists(&self.database)
            .await?
        {
            200 => tracing::info!("Database {} already exists", self.database),
            201 => tracing::info!("Database {} created", self.database),
            code => {
                tracing::error!(
                    "Unknown response {} when creating database {}",
                    code,
                    self.database
                );
                bail!("unknown response {} when creating database {}", code, self.database);
            }
        }

        let properties = Self::container_properties();
        match self
            .store
            .create_container_if_not_exists(&self.database, &properties, MAX_THROUGHPUT)
            .await?
        {
            200 => tracing::info!("Container {} already exists", CONTAINER_NAME),
            201 => tracing::info!("Container {} created", CONTAINER_NAME),
            code => {
                tracing::error!(
                    "Unknown response {} when creating container {}",
                    code,
                    CONTAINER_NAME
                );
                bail!("unknown response {} when creating container {}", code, CONTAINER_NAME);
            }
        }

        Ok(())
    }
}
