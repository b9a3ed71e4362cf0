//! Tutorial server binary

use anyhow::{Context, Result};
use artistry::api::{create_router, ApiState};
use artistry::{ArtistryConfig, Catalog};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config from file
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let loaded = ArtistryConfig::load(&config_path)
        .with_context(|| format!("Failed to load config file: {}", config_path))?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.tracing_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting artistry server v{}", env!("CARGO_PKG_VERSION"));
    if found {
        info!(config_path = config_path, "Loaded configuration");
    } else {
        warn!(config_path = config_path, "Config file not found, using defaults");
    }

    let catalog = Catalog::builtin().context("Failed to build tutorial catalog")?;
    info!(
        examples = catalog.examples.len(),
        questions = catalog.quiz.len(),
        "Loaded tutorial catalog"
    );

    let state = Arc::new(ApiState {
        catalog: Arc::new(catalog),
        cors_permissive: config.cors_permissive,
    });

    // Create router
    let app = create_router(state);

    // Start server
    let ip = config
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind_address: {}", config.bind_address))?;
    let addr = SocketAddr::new(ip, config.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
