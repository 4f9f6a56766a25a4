use anyhow::Result;
use storefront_core::{config::Config, migration, server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and metrics
    let metrics_handle = telemetry::init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Storefront Core Service");

    // Apply pending schema migrations before accepting traffic
    migration::run_migrations(&config).await?;

    info!("HTTP server listening on {}", config.http_addr());

    // Run the server
    server::run(config, metrics_handle).await
}
