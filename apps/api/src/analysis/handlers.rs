//! Axum route handler for résumé analysis.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::analyze_resume;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
}

/// POST /api/analyze_resume
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(request) = payload?;

    let resume_text = request
        .resume_text
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| AppError::Validation("No resume text provided for analysis".to_string()))?;

    let analysis = analyze_resume(&resume_text, &state.llm).await?;

    Ok(Json(AnalyzeResponse { analysis }))
}
