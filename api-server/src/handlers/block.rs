//! Block list handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct BlockResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub blocked_count: usize,
}

/// Write a block report from the current result set
pub async fn block(State(state): State<AppState>) -> AppResult<Json<BlockResponse>> {
    let service = state.service.clone();
    let report = tokio::task::spawn_blocking(move || service.generate_block_report()).await??;

    tracing::info!("Blocked IPs list saved to reports folder: {}", report.name);

    Ok(Json(BlockResponse {
        success: true,
        message: "Blocked IPs list saved successfully to Reports folder".to_string(),
        filename: report.name,
        blocked_count: report.count,
    }))
}
