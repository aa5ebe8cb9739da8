//! Classification handler

use std::io::BufReader;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use ddos_shield_core::LabelCounts;

use crate::{AppError, AppResult, AppState};

/// Multipart field carrying the CSV upload
const FILE_FIELD: &str = "file";

/// Classify an uploaded CSV and make it the current result set
pub async fn predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<LabelCounts>> {
    let run_id = Uuid::new_v4();

    let upload = spool_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    tracing::info!(%run_id, "Upload spooled, starting classification");

    let service = state.service.clone();
    let counts = tokio::task::spawn_blocking(move || {
        let file = upload.reopen()?;
        service.classify(BufReader::new(file)).map_err(AppError::from)
    })
    .await??;

    tracing::info!(
        %run_id,
        legitimate = counts.legitimate,
        low_rated = counts.low_rated,
        high_rated = counts.high_rated,
        "Classification committed"
    );

    Ok(Json(counts))
}

/// Stream the `file` field to a temporary file, chunk by chunk.
/// Returns `None` when the form has no such field.
async fn spool_upload(multipart: &mut Multipart) -> AppResult<Option<NamedTempFile>> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let spool = NamedTempFile::new()?;
        let mut out = tokio::fs::File::from_std(spool.reopen()?);
        let mut bytes = 0usize;

        while let Some(chunk) = field.chunk().await? {
            bytes += chunk.len();
            out.write_all(&chunk).await?;
        }
        out.flush().await?;

        tracing::debug!(
            filename = field.file_name().unwrap_or("<unnamed>"),
            bytes,
            "Received upload"
        );

        return Ok(Some(spool));
    }

    Ok(None)
}
