//! Exoplanet AI HTTP Server Binary
//!
//! Loads the configuration and the solar system catalog, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin exoplanet-server
//! ```
//!
//! # Environment Variables
//!
//! - `EXOPLANET_CONFIG`: Path to `exoplanet.toml` (default: searched)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8000)
//! - `SOLAR_SYSTEM_DATA`: Path to the reference data JSON
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use exoplanet_ai::catalog::SolarSystemCatalog;
use exoplanet_ai::config::AppConfig;
use exoplanet_ai::http::{create_router, AppState};
use exoplanet_ai::services::SolarSystemService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Exoplanet AI HTTP Server");

    let config = AppConfig::load()?;
    let engine = config.engine_config()?;

    let catalog = Arc::new(SolarSystemCatalog::from_file(&config.data.solar_system_path)?);
    info!(
        planets = catalog.len(),
        solver = ?engine.kepler_solver,
        "Catalog initialized successfully"
    );

    let service = Arc::new(SolarSystemService::new(catalog, engine));
    let state = AppState::new(service)
        .with_default_resolution(config.engine.default_resolution)
        .with_simulation_timeout(config.engine.simulation_timeout())
        .with_body_limit(config.server.body_limit_bytes);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    let addr = listener.local_addr()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
