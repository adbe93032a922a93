//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    environment: String,
    model_loaded: bool,
    timestamp: i64,
}

/// "degraded" while the artifacts are not loaded
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let model_loaded = state.pipeline.is_ok();

    Json(HealthResponse {
        status: if model_loaded { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        model_loaded,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
