use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::search::provider::SearchProvider;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds only clients and config; nothing request-specific lives here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: LlmClient,
    /// Pluggable search backend. Default: BraveSearchClient.
    pub search: Arc<dyn SearchProvider>,
}
