use serde::{Deserialize, Serialize};

/// Distinguishes broad role searches from company-specific ones.
/// Carried through to every result item so the page can group them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    GeneralRole,
    TargetedCompanyRole,
}

/// A single search query derived from an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub query: String,
    pub query_type: QueryType,
}

impl SearchQuery {
    /// `"<role>" job openings`
    pub fn general(role: &str) -> Self {
        Self {
            query: format!("\"{role}\" job openings"),
            query_type: QueryType::GeneralRole,
        }
    }

    /// `"<role>" job at "<company>"`
    pub fn targeted(company: &str, role: &str) -> Self {
        Self {
            query: format!("\"{role}\" job at \"{company}\""),
            query_type: QueryType::TargetedCompanyRole,
        }
    }
}

/// A single web result, tagged with the type of query that found it.
/// Provider fields are passed through as-is and may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub query_type: QueryType,
}
