use anyhow::Result;
use async_trait::async_trait;

use crate::model::types::{Franchise, Starship};

/// Persistence gateway for starship records.
///
/// The HTTP layer depends on this trait only, so the Cosmos-backed
/// implementation can be swapped for an in-memory one in tests. Errors
/// propagate unmodified; the gateway performs no retries of its own.
#[async_trait]
pub trait StarshipRepository: Send + Sync {
    /// Returns every stored record, in store-native order.
    async fn find_all(&self) -> Result<Vec<Starship>>;

    /// Returns the records whose franchise equals the argument. The filter
    /// is evaluated by the store, not in process.
    async fn find_all_by_franchise(&self, franchise: Franchise) -> Result<Vec<Starship>>;

    /// Upserts the record, assigning an id when absent, and returns the
    /// persisted record including its id.
    async fn save(&self, starship: Starship) -> Result<Starship>;
}
