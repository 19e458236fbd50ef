//! Analysis Extractor: pulls the analysis JSON object out of free-form model output.
//!
//! Models wrap their answer in prose or code fences despite being told not to.
//! Candidates are tried in this order:
//! 1. each top-level balanced `{…}` span, found by tracking brace depth and
//!    string/escape state; spans nested inside an earlier span are never tried
//!    on their own. The first span that is a JSON object with at least one
//!    analysis key wins;
//! 2. the span from the first `{` to the last `}`, which must parse as JSON.
//!
//! No braces at all means there is nothing to parse, which is an error.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::analysis::{AnalysisResult, ANALYSIS_FIELDS};

#[derive(Debug, Error)]
pub enum AnalysisParseError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("invalid analysis JSON ({source}): {candidate}")]
    InvalidJson {
        candidate: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Extracts and parses the analysis object embedded in `text`.
pub fn extract_analysis(text: &str) -> Result<AnalysisResult, AnalysisParseError> {
    if let Some((span, analysis)) = balanced_objects(text).find_map(|span| {
        parse_analysis_object(span).map(|analysis| (span, analysis))
    }) {
        debug!("Extracted JSON string: {span}");
        return Ok(analysis);
    }

    let candidate = outermost_braces(text).ok_or(AnalysisParseError::NoJsonObject)?;
    debug!("Falling back to outermost braces: {candidate}");
    serde_json::from_str(candidate).map_err(|source| AnalysisParseError::InvalidJson {
        candidate: candidate.to_string(),
        source,
    })
}

fn parse_analysis_object(span: &str) -> Option<AnalysisResult> {
    let object: Map<String, Value> = serde_json::from_str(span).ok()?;
    if !ANALYSIS_FIELDS.iter().any(|field| object.contains_key(*field)) {
        return None;
    }
    serde_json::from_value(Value::Object(object)).ok()
}

/// Span from the first `{` to the last `}` inclusive, if they are in that order.
pub fn outermost_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Every top-level balanced `{…}` span, left to right. Scanning resumes after
/// the end of each span, so nested objects are not yielded separately. An
/// opening brace that never closes is skipped. Braces inside JSON string
/// literals do not count.
pub fn balanced_objects(text: &str) -> impl Iterator<Item = &str> + '_ {
    let mut cursor = 0;
    std::iter::from_fn(move || {
        while let Some(offset) = text[cursor..].find('{') {
            let start = cursor + offset;
            match balanced_end(&text[start..]) {
                Some(len) => {
                    cursor = start + len;
                    return Some(&text[start..cursor]);
                }
                None => cursor = start + 1,
            }
        }
        None
    })
}

/// Byte length of the balanced object that `text` starts with.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}
