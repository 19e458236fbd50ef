//! Search Aggregator: turns an analysis into job-search queries and collects the hits.
//!
//! Queries run one after another. A failed query is logged and skipped; it
//! still counts as performed but contributes no results.

pub mod handlers;
pub mod provider;

use tracing::{info, warn};

use crate::models::analysis::AnalysisResult;
use crate::models::search::{SearchQuery, SearchResultItem};
use provider::SearchProvider;

/// Everything one aggregation run produced.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// Every attempted query string, including failed ones, in execution order.
    pub queries_performed: Vec<String>,
    pub results: Vec<SearchResultItem>,
    pub failed_queries: usize,
}

/// Builds the query list for `analysis`.
///
/// First one general query per suggested role, then one targeted query per
/// (company, role) pair with companies in the outer loop.
pub fn build_queries(analysis: &AnalysisResult) -> Vec<SearchQuery> {
    let roles = &analysis.suggested_roles;

    let general = roles.iter().map(|role| SearchQuery::general(role));
    let targeted = analysis
        .suggested_companies
        .iter()
        .flat_map(|company| roles.iter().map(move |role| SearchQuery::targeted(company, role)));

    general.chain(targeted).collect()
}

/// Runs every query for `analysis` against `provider` and flattens the results.
pub async fn aggregate(analysis: &AnalysisResult, provider: &dyn SearchProvider) -> SearchOutcome {
    let queries = build_queries(analysis);
    let mut outcome = SearchOutcome {
        queries_performed: Vec::with_capacity(queries.len()),
        ..Default::default()
    };

    for SearchQuery { query, query_type } in queries {
        match provider.search(&query).await {
            Ok(hits) => {
                outcome
                    .results
                    .extend(hits.into_iter().map(|hit| SearchResultItem {
                        title: hit.title,
                        url: hit.url,
                        description: hit.description,
                        query_type,
                    }));
            }
            Err(e) => {
                warn!("Error performing {query_type:?} search for '{query}': {e}");
                outcome.failed_queries += 1;
            }
        }
        outcome.queries_performed.push(query);
    }

    info!(
        "Web search completed: {} queries ({} failed), {} results",
        outcome.queries_performed.len(),
        outcome.failed_queries,
        outcome.results.len()
    );

    outcome
}
