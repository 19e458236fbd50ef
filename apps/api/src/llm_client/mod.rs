//! LLM Client: the single point of entry for calls to the local generation endpoint.
//!
//! No other module may talk to the LLM server directly.
//! Output is always requested as a stream and accumulated into one string.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::LlmConfig;

pub mod prompts;
pub mod stream;

pub use stream::{GenerateResponse, StreamAccumulator};

const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Client for an Ollama-compatible `/api/generate` endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }

    /// The model used when a call does not name one.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends `prompt` and accumulates the streamed answer.
    ///
    /// Reading stops at the first fragment flagged `done` or at end of stream.
    /// Malformed fragments are logged and skipped. A refused connection or a
    /// non-2xx status is returned as an error without retrying.
    pub async fn generate(
        &self,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<GenerateResponse, LlmError> {
        let model = model.unwrap_or(&self.model);
        let url = format!("{}{}", self.base_url, GENERATE_PATH);
        let request_body = GenerateRequest {
            model,
            prompt,
            stream: true,
        };

        debug!(
            "POST {url} (model: {model}, prompt: {} chars)",
            prompt.chars().count()
        );

        let mut response = self.client.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let mut accumulator = StreamAccumulator::new();
        while let Some(chunk) = response.chunk().await? {
            if accumulator.feed(&chunk) {
                break;
            }
        }

        let fragments = accumulator.fragments();
        let skipped = accumulator.skipped();
        let result = accumulator.finish();

        info!(
            "LLM generation finished: {} chars from {fragments} fragments ({skipped} skipped), done={}",
            result.response.chars().count(),
            result.done
        );

        Ok(result)
    }
}
