use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use super::gateway::StarshipRepository;
use crate::model::types::{Franchise, Starship};

/// In-memory implementation of the persistence gateway.
///
/// Backs the handler tests and mirrors the Cosmos implementation's
/// semantics: upsert by id, id assignment when absent.
pub struct InMemoryStarshipRepository {
    starships: DashMap<String, Starship>,
}

impl InMemoryStarshipRepository {
    pub fn new() -> Self {
        Self {
            starships: DashMap::new(),
        }
    }
}

impl Default for InMemoryStarshipRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StarshipRepository for InMemoryStarshipRepository {
    async fn find_all(&self) -> Result<Vec<Starship>> {
        Ok(self
            .starships
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_all_by_franchise(&self, franchise: Franchise) -> Result<Vec<Starship>> {
        Ok(self
            .starships
            .iter()
            .filter(|entry| entry.value().franchise == franchise)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn save(&self, mut starship: Starship) -> Result<Starship> {
        let id = match starship.id.clone() {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                starship.id = Some(id.clone());
                id
            }
        };

        self.starships.insert(id, starship.clone());
        Ok(starship)
    }
}
