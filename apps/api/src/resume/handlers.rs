//! Axum route handlers for the Resume API.

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::extraction::extract;
use crate::models::resume::ResumeRecord;
use crate::readers::{DocumentFormat, DocumentReadError};
use crate::state::AppState;

/// Multipart field carrying the uploaded document.
const FILE_FIELD: &str = "file";

/// Returned by `/analyze` when the body is blank.
pub const EMPTY_RESUME_MESSAGE: &str = "Please upload a resume";

/// Returned by `/analyze` when the advisory call fails for any reason.
pub const ADVISORY_UNAVAILABLE_MESSAGE: &str =
    "Service temporarily unavailable: please check the API key or network connection";

/// POST /api/resume/upload
///
/// Accepts a `.pdf` or `.docx` in the multipart field `file` and returns the
/// structured record. Reading and extraction are CPU-bound and run on the
/// blocking pool.
pub async fn handle_upload(mut multipart: Multipart) -> Result<Json<ResumeRecord>, AppError> {
    let (filename, bytes) = read_file_field(&mut multipart).await?;

    if bytes.is_empty() {
        warn!("Rejected empty upload '{filename}'");
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let Some(reader) = DocumentFormat::detect(&filename).reader() else {
        warn!("Unsupported file format: '{filename}'");
        return Err(AppError::UnsupportedFormat(filename));
    };

    let record = tokio::task::spawn_blocking(move || -> Result<ResumeRecord, DocumentReadError> {
        let lines = reader.read_lines(&bytes)?;
        Ok(extract(&lines))
    })
    .await
    .context("Resume parsing task failed")??;

    info!("Parsed resume '{}' for {}", filename, record.name);
    Ok(Json(record))
}

/// POST /api/resume/analyze
///
/// Sends the raw resume text to the advisory model. Always answers 200: a
/// blank body gets a prompt message, an advisory failure gets a fixed
/// fallback and the cause is only logged.
pub async fn handle_analyze(State(state): State<AppState>, body: String) -> String {
    if body.trim().is_empty() {
        return EMPTY_RESUME_MESSAGE.to_string();
    }

    match state.advisor.critique(&body).await {
        Ok(advice) => advice,
        Err(e) => {
            error!("Resume analysis failed: {e}");
            ADVISORY_UNAVAILABLE_MESSAGE.to_string()
        }
    }
}

/// Finds the `file` field and returns its filename and contents.
async fn read_file_field(multipart: &mut Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        return Ok((filename, bytes));
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}
