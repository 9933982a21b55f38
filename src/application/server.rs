//! HTTP surface: `GET /swap` and `GET /health`

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::application::context::AppContext;
use crate::shared::types::SwapOutcome;

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn create_router(state: Arc<AppContext>) -> Router {
    Router::new()
        .route("/swap", get(swap))
        .route("/health", get(health_check))
        .with_state(state)
}

/// GET /swap
///
/// Always 200; failures are reported through `success` and `error`.
async fn swap(State(state): State<Arc<AppContext>>) -> Json<SwapOutcome> {
    info!("📥 Swap requested");
    Json(state.execute_swap().await)
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
