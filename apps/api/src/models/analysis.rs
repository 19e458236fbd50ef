use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level keys of an analysis object.
pub const ANALYSIS_FIELDS: [&str; 5] = [
    "summary",
    "skills",
    "industries",
    "suggested_companies",
    "suggested_roles",
];

/// Structured résumé analysis produced by the LLM.
///
/// Every field is optional on the wire and off-schema shapes are coerced
/// rather than rejected: a non-string summary becomes `""`, a list keeps only
/// its string elements, and a bare string becomes a one-element list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub industries: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub suggested_companies: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub suggested_roles: Vec<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}
