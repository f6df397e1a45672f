//! Startup Configuration
//!
//! The Cosmos account endpoint, master key, and database name come from the
//! environment and are treated as opaque inputs. Missing required variables
//! fail startup with the variable named in the error.

use anyhow::{Context, Result, anyhow};
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct Config {
    /// Cosmos account endpoint, e.g. `https://localhost:8081`.
    pub endpoint: String,
    /// Base64 master key of the account.
    pub master_key: String,
    /// Target database name.
    pub database: String,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let endpoint = require("COSMOS_ENDPOINT")?;
        let master_key = require("COSMOS_KEY")?;
        let database = require("COSMOS_DATABASE")?;
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR is not a valid socket address")?;

        Ok(Self {
            endpoint,
            master_key,
            database,
            bind_addr,
        })
    }
}

fn require(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| anyhow!("{} is required", name))
}
