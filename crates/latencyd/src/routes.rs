//! API routes for latencyd

use crate::error::ServiceError;
use crate::handler;
use crate::server::AppState;
use crate::types::{HealthResponse, StatsRequest, StatsResponse};
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::any::Any;
use std::sync::Arc;
use tower_http::cors::{self, CorsLayer};
use tracing::{error, warn};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Latency Routes
// ============================================================================

pub fn latency_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/", post(latency_stats))
        .route("/v1/latency", post(latency_stats))
}

async fn latency_stats(
    State(state): State<AppStateArc>,
    body: Bytes,
) -> Result<Json<StatsResponse>, ServiceError> {
    let request = StatsRequest::decode(&body).map_err(|e| {
        warn!("Rejected stats request: {}", e);
        e
    })?;

    let response = handler::handle(&state.store, &request)?;
    Ok(Json(response))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        records: state.store.len(),
        regions: state.store.region_count(),
    })
}

// ============================================================================
// Layers
// ============================================================================

/// Any origin, POST only, any headers
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods([Method::POST])
        .allow_headers(cors::Any)
}

/// Map a handler panic to a 500 `{"error": ...}` body
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };
    error!("Request handler panicked: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
