// Résumé analysis: prompt the LLM, then pull the analysis object out of its answer.

pub mod extractor;
pub mod handlers;
pub mod prompts;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::analysis::AnalysisResult;
use extractor::extract_analysis;
use prompts::build_analysis_prompt;

/// Runs one analysis round-trip for `resume_text` using the client's default model.
pub async fn analyze_resume(resume_text: &str, llm: &LlmClient) -> Result<AnalysisResult, AppError> {
    let prompt = build_analysis_prompt(resume_text);

    info!("Calling LLM ({}) for resume analysis...", llm.model());
    let response = llm.generate(&prompt, None).await?;

    let content = response.response.trim();
    debug!("Raw LLM response content: {content}");

    Ok(extract_analysis(content)?)
}
