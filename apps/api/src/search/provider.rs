//! Search provider seam and the Brave Search implementation.
//!
//! `AppState` holds an `Arc<dyn SearchProvider>` so tests can swap in a stub.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::SearchConfig;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search API key not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// A single hit as returned by the provider. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebResult {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    web: Option<WebResults>,
}

#[derive(Debug, Default, Deserialize)]
struct WebResults {
    #[serde(default)]
    results: Vec<WebResult>,
}

/// Runs one web search query. Implement this to swap providers without
/// touching the aggregator or the handler.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<WebResult>, SearchError>;
}

/// Brave Search web API client.
#[derive(Clone)]
pub struct BraveSearchClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BraveSearchClient {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl SearchProvider for BraveSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<WebResult>, SearchError> {
        let api_key = self.api_key.as_deref().ok_or(SearchError::MissingApiKey)?;

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
            .header("Accept", "application/json")
            .header("X-Subscription-Token", api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let parsed: SearchResponse = response.json().await?;
        let results = parsed.web.map(|web| web.results).unwrap_or_default();

        debug!("Search '{query}' returned {} results", results.len());
        Ok(results)
    }
}
