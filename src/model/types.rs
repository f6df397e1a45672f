use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of franchises a starship can belong to.
///
/// Serialized as SCREAMING_SNAKE_CASE strings (`STAR_TREK`, ...), which is
/// also the partition key value of the stored document. Unrecognized values
/// fail deserialization and `FromStr` parsing instead of being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Franchise {
    StarTrek,
    StarWars,
    BattlestarGalactica,
    Stargate,
}

impl Franchise {
    pub fn as_str(&self) -> &'static str {
        match self {
            Franchise::StarTrek => "STAR_TREK",
            Franchise::StarWars => "STAR_WARS",
            Franchise::BattlestarGalactica => "BATTLESTAR_GALACTICA",
            Franchise::Stargate => "STARGATE",
        }
    }
}

impl fmt::Display for Franchise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Franchise {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STAR_TREK" => Ok(Franchise::StarTrek),
            "STAR_WARS" => Ok(Franchise::StarWars),
            "BATTLESTAR_GALACTICA" => Ok(Franchise::BattlestarGalactica),
            "STARGATE" => Ok(Franchise::Stargate),
            other => bail!("unknown franchise: {}", other),
        }
    }
}

/// A starship record as stored in the `starships` container.
///
/// `id` is absent until the record is first persisted and immutable once
/// assigned. Cosmos system metadata on stored documents (`_rid`, `_etag`,
/// `_ts`, ...) is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starship {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub franchise: Franchise,
    pub name: String,
    #[serde(rename = "className")]
    pub class_name: String,
    pub registration: String,
}

impl Starship {
    /// Checks that the free-text fields are present and non-blank.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.name.trim().is_empty() {
            bail!("name must not be blank");
        }
        if self.class_name.trim().is_empty() {
            bail!("className must not be blank");
        }
        if self.registration.trim().is_empty() {
            bail!("registration must not be blank");
        }
        Ok(())
    }
}
