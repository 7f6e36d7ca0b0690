//! latencyd - region latency statistics daemon
//!
//! Loads the telemetry snapshot once, then serves per-region stats over HTTP.

use anyhow::{Context, Result};
use latencyd::config::Config;
use latencyd::logging::init_logging;
use latencyd::server::{self, AppState};
use latencyd::store::TelemetryStore;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = Config::locate();
    let config = match &config_path {
        Some(path) => Config::load_from_path(path).context("Failed to load configuration")?,
        None => Config::default(),
    };

    init_logging(&config.logging);

    info!("[BOOT] latencyd v{} starting", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => info!("[BOOT] Loaded config from {}", path.display()),
        None => warn!("[BOOT] No config file found, using defaults"),
    }

    // The dataset must be in memory before the listener is bound
    let dataset_path = config.dataset.resolve_path();
    let store = match TelemetryStore::load(&dataset_path) {
        Ok(store) => store,
        Err(e) => {
            error!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };

    server::run(AppState::new(store), &config.server)
        .await
        .context("HTTP server failed")?;

    info!("latencyd stopped");
    Ok(())
}
