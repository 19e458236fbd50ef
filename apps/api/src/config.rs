use anyhow::{Context, Result};

pub const DEFAULT_LLM_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_LLM_MODEL: &str = "gpt-oss";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://api.search.brave.com/res/v1/web/search";

/// Application configuration loaded from environment variables.
/// Nothing is strictly required: a missing search key only disables the searches.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub search: SearchConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Connection settings for the local generation endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: Option<u64>,
}

/// Connection settings for the web search provider.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or_alias = |key: &str, alias: &str| get(key).or_else(|| get(alias));

        let timeout_secs = get("HTTP_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?;

        let base_url = get_or_alias("LLM_BASE_URL", "OLLAMA_BASE_URL")
            .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string());

        Ok(Config {
            llm: LlmConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                model: get_or_alias("LLM_MODEL", "OLLAMA_MODEL")
                    .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                timeout_secs,
            },
            search: SearchConfig {
                base_url: get("SEARCH_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_SEARCH_BASE_URL.to_string()),
                api_key: get_or_alias("SEARCH_API_KEY", "BRAVE_SEARCH_API_KEY"),
                timeout_secs,
            },
            port: get("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
