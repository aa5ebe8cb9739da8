//! Error handling

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use ddos_shield_core::{ClassifyError, ReportError};

pub type AppResult<T> = Result<T, AppError>;

pub const NO_PREDICTIONS_MESSAGE: &str = "No predictions available. Please analyze the file first.";
pub const REPORT_FAILED_MESSAGE: &str = "Failed to save blocked IPs list";

#[derive(Debug, Error)]
pub enum AppError {
    // Input errors
    #[error("{0}")]
    BadRequest(String),

    #[error("upload failed: {0}")]
    Upload(#[from] MultipartError),

    // State errors
    #[error("no predictions available")]
    NoPredictions,

    #[error("{0}")]
    Conflict(String),

    // Resource errors
    #[error("report generation failed: {0}")]
    ReportFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Upload(err) => (err.status(), err.body_text()),
            AppError::NoPredictions => (StatusCode::BAD_REQUEST, NO_PREDICTIONS_MESSAGE.to_string()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::ReportFailed(msg) => {
                tracing::error!("Error saving blocked IPs list: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, REPORT_FAILED_MESSAGE.to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ClassifyError> for AppError {
    fn from(err: ClassifyError) -> Self {
        match err {
            ClassifyError::RunInProgress => AppError::Conflict(err.to_string()),
            err if err.is_client_fault() => AppError::BadRequest(err.to_string()),
            err => AppError::InternalError(err.to_string()),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        if err.is_no_result() {
            AppError::NoPredictions
        } else {
            AppError::ReportFailed(err.to_string())
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(format!("worker task failed: {}", err))
    }
}
