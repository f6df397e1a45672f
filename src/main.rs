use std::sync::Arc;

use cosmos_starships::api;
use cosmos_starships::config::Config;
use cosmos_starships::provisioning::provisioner::{Provisioner, ProvisioningStore};
use cosmos_starships::storage::cosmos::{CosmosClient, CosmosStarshipRepository};
use cosmos_starships::storage::gateway::StarshipRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = Config::from_env()?;

    tracing::info!("Connecting to Cosmos account {}", config.endpoint);
    let client = Arc::new(CosmosClient::new(&config.endpoint, &config.master_key)?);

    // 1. Provision database and container, fatal on anything unexpected.
    //    The listener must not bind before this completes.
    let provisioner = Provisioner::new(
        client.clone() as Arc<dyn ProvisioningStore>,
        config.database.clone(),
    );
    provisioner.provision().await?;

    // 2. HTTP router over the Cosmos-backed gateway:
    let repository: Arc<dyn StarshipRepository> =
        Arc::new(CosmosStarshipRepository::new(client, config.database.clone()));
    let app = api::router(repository);

    // 3. Serve:
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
