//! Axum route handler for résumé upload.

use axum::{extract::multipart::MultipartRejection, extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::extract_text_blocking;
use crate::resume::read_resume_upload;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub resume_text: String,
}

/// POST /api/upload_resume
///
/// Only PDF résumés are supported; anything else fails extraction.
pub async fn handle_upload_resume(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let multipart = multipart
        .map_err(|e| AppError::Validation(format!("No resume file provided: {}", e.body_text())))?;
    let upload = read_resume_upload(multipart).await?;

    let extracted = extract_text_blocking(upload.data).await?;
    info!(
        "Resume '{}' parsed successfully ({} pages, {} chars)",
        upload.file_name,
        extracted.page_count,
        extracted.char_count()
    );

    Ok(Json(UploadResponse {
        message: "Resume uploaded and parsed successfully".to_string(),
        resume_text: extracted.text,
    }))
}
