//! HTTP server for latencyd

use crate::config::ServerConfig;
use crate::routes;
use crate::store::TelemetryStore;
use anyhow::Result;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
///
/// The store is immutable, so handlers read it without locking.
pub struct AppState {
    pub store: TelemetryStore,
    pub start_time: Instant,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: TelemetryStore) -> Self {
        Self {
            store,
            start_time: Instant::now(),
            started_at: Utc::now(),
        }
    }
}

/// Build the router with all routes and layers
pub fn app(state: Arc<AppState>, config: &ServerConfig) -> Router {
    Router::new()
        .merge(routes::latency_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(CatchPanicLayer::custom(routes::panic_response))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(routes::cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C
pub async fn run(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = app(Arc::new(state), config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("[BOOT] Listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down gracefully");
    }
}
