//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

pub const BANNER: &str = "DDOS Analysis API is running";

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model: String,
    has_predictions: bool,
    run_in_progress: bool,
}

/// Plain-text liveness banner
pub async fn index() -> &'static str {
    BANNER
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model: state.service.engine().classifier().name().to_string(),
        has_predictions: state.service.store().has_result(),
        run_in_progress: state.service.is_running(),
    })
}
