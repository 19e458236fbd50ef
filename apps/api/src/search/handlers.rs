//! Axum route handler for the job search step.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::models::search::SearchResultItem;
use crate::search::aggregate;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WebSearchRequest {
    /// Kept untyped so a malformed analysis is reported as a validation error.
    #[serde(default)]
    pub analysis: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct WebSearchResponse {
    pub message: String,
    pub queries_performed: Vec<String>,
    pub results: Vec<SearchResultItem>,
}

/// POST /api/web_search
pub async fn handle_web_search(
    State(state): State<AppState>,
    payload: Result<Json<WebSearchRequest>, JsonRejection>,
) -> Result<Json<WebSearchResponse>, AppError> {
    let Json(request) = payload?;
    let analysis = parse_analysis(request.analysis)?;

    let outcome = aggregate(&analysis, state.search.as_ref()).await;

    Ok(Json(WebSearchResponse {
        message: "Web search completed".to_string(),
        queries_performed: outcome.queries_performed,
        results: outcome.results,
    }))
}

fn parse_analysis(raw: Option<Value>) -> Result<AnalysisResult, AppError> {
    let missing = || AppError::Validation("No analysis data provided for web search".to_string());

    let raw = match raw {
        None | Some(Value::Null) => return Err(missing()),
        Some(Value::Object(map)) if map.is_empty() => return Err(missing()),
        Some(value @ Value::Object(_)) => value,
        Some(_) => {
            return Err(AppError::Validation(
                "Malformed analysis data: expected a JSON object".to_string(),
            ))
        }
    };

    serde_json::from_value(raw)
        .map_err(|e| AppError::Validation(format!("Malformed analysis data: {e}")))
}
