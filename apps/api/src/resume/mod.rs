// Résumé intake: multipart upload → PDF text.

pub mod handlers;

use axum::extract::Multipart;

use crate::errors::AppError;

/// Name of the multipart form field carrying the résumé file.
pub const RESUME_FIELD: &str = "resume";

/// The uploaded résumé file.
#[derive(Debug)]
pub struct UploadedResume {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Reads the first `resume` field out of a multipart form. Other fields,
/// and any later `resume` parts, are ignored.
///
/// Validation order: no field, then empty file name, then zero bytes.
pub async fn read_resume_upload(mut multipart: Multipart) -> Result<UploadedResume, AppError> {
    let mut upload: Option<UploadedResume> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read file data: {e}")))?
            .to_vec();

        upload = Some(UploadedResume { file_name, data });
        break;
    }

    let upload =
        upload.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;
    if upload.file_name.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    if upload.data.is_empty() {
        return Err(AppError::Validation(
            "Uploaded resume file is empty".to_string(),
        ));
    }

    Ok(upload)
}
