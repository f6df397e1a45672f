//! Provisioning Tests
//!
//! Covers the two-step status-code state machine with a scripted store:
//! already-present, newly-created, fatal-error, and idempotent re-run paths.

#[cfg(test)]
mod tests {
    use crate::provisioning::provisioner::{
        MAX_THROUGHPUT, PARTITION_KEY_PATH, Provisioner, ProvisioningStore,
    };
    use crate::storage::protocol::ContainerProperties;
    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::Mutex;

    /// Store stub that replays scripted status codes and records calls.
    struct ScriptedStore {
        database_codes: Mutex<Vec<u16>>,
        container_codes: Mutex<Vec<u16>>,
        database_calls: Mutex<u32>,
        container_calls: Mutex<u32>,
    }

    impl ScriptedStore {
        fn new(database_codes: Vec<u16>, container_codes: Vec<u16>) -> Arc<Self> {
            Arc::new(Self {
                database_codes: Mutex::new(database_codes),
                container_codes: Mutex::new(container_codes),
                database_calls: Mutex::new(0),
                container_calls: Mutex::new(0),
            })
        }

        fn database_calls(&self) -> u32 {
            *self.database_calls.lock().unwrap()
        }

        fn container_calls(&self) -> u32 {
            *self.container_calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl ProvisioningStore for ScriptedStore {
        async fn create_database_if_not_exists(&self, _database: &str) -> Result<u16> {
            *self.database_calls.lock().unwrap() += 1;
            let mut codes = self.database_codes.lock().unwrap();
            if codes.is_empty() {
                bail!("store unreachable");
            }
            Ok(codes.remove(0))
        }

        async fn create_container_if_not_exists(
            &self,
            _database: &str,
            _properties: &ContainerProperties,
            _max_throughput: u32,
        ) -> Result<u16> {
            *self.container_calls.lock().unwrap() += 1;
            let mut codes = self.container_codes.lock().unwrap();
            if codes.is_empty() {
                bail!("store unreachable");
            }
            Ok(codes.remove(0))
        }
    }

    fn provisioner(store: Arc<ScriptedStore>) -> Provisioner {
        Provisioner::new(store, "starshipdb".to_string())
    }

    // ============================================================
    // STATUS-CODE STATE MACHINE
    // ============================================================

    #[tokio::test]
    async fn test_provision_succeeds_on_fresh_deployment() {
        let store = ScriptedStore::new(vec![201], vec![201]);
        let result = provisioner(store.clone()).provision().await;

        assert!(result.is_ok());
        assert_eq!(store.database_calls(), 1);
        assert_eq!(store.container_calls(), 1);
    }

    #[tokio::test]
    async fn test_provision_succeeds_when_everything_exists() {
        let store = ScriptedStore::new(vec![200], vec![200]);
        assert!(provisioner(store).provision().await.is_ok());
    }

    #[tokio::test]
    async fn test_provision_accepts_mixed_exists_and_created() {
        // Database survived a previous run, container did not.
        let store = ScriptedStore::new(vec![200], vec![201]);
        assert!(provisioner(store).provision().await.is_ok());
    }

    #[tokio::test]
    async fn test_unexpected_database_status_is_fatal() {
        let store = ScriptedStore::new(vec![503], vec![200]);
        let err = provisioner(store.clone()).provision().await.unwrap_err();

        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("database"));
        // Startup aborts before the container step.
        assert_eq!(store.container_calls(), 0);
    }

    #[tokio::test]
    async fn test_unexpected_container_status_is_fatal() {
        let store = ScriptedStore::new(vec![200], vec![429]);
        let err = provisioner(store).provision().await.unwrap_err();

        // The message carries the container's status code, not the
        // database's.
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("container starships"));
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let store = ScriptedStore::new(vec![], vec![]);
        let err = provisioner(store).provision().await.unwrap_err();
        assert!(err.to_string().contains("unreachable"));
    }

    #[tokio::test]
    async fn test_provision_is_idempotent_across_runs() {
        // First run creates both, second run finds both present.
        let store = ScriptedStore::new(vec![201, 200], vec![201, 200]);
        let provisioner = provisioner(store.clone());

        assert!(provisioner.provision().await.is_ok());
        assert!(provisioner.provision().await.is_ok());
        assert_eq!(store.database_calls(), 2);
        assert_eq!(store.container_calls(), 2);
    }

    // ============================================================
    // CONTAINER PROPERTIES
    // ============================================================

    #[test]
    fn test_container_is_partitioned_on_franchise() {
        let properties = Provisioner::container_properties();

        assert_eq!(properties.id, "starships");
        assert_eq!(properties.partition_key.paths, vec![PARTITION_KEY_PATH]);
        assert_eq!(properties.partition_key.kind, "Hash");
        assert_eq!(MAX_THROUGHPUT, 4000);
    }

    #[test]
    fn test_indexing_policy_covers_queried_paths_only() {
        let policy = Provisioner::container_properties().indexing_policy;

        let included: Vec<&str> = policy
            .included_paths
            .iter()
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(included, vec!["/franchise/?", "/name/?", "/className/?"]);

        let excluded: Vec<&str> = policy
            .excluded_paths
            .iter()
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(excluded, vec!["/\"_etag\"/?", "/*"]);
    }

    #[test]
    fn test_container_properties_wire_format() {
        let json = serde_json::to_value(Provisioner::container_properties()).unwrap();

        assert_eq!(json["id"], "starships");
        assert_eq!(json["partitionKey"]["paths"][0], "/franchise");
        assert_eq!(json["indexingPolicy"]["indexingMode"], "consistent");
        assert_eq!(json["indexingPolicy"]["automatic"], true);
        assert_eq!(json["indexingPolicy"]["excludedPaths"][1]["path"], "/*");
    }
}
