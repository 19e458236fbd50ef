mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod resume;
mod routes;
mod search;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::search::provider::BraveSearchClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobScout v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(&config.llm)?;
    info!(
        "LLM client initialized ({}, model: {})",
        llm.base_url(),
        llm.model()
    );

    let search = BraveSearchClient::new(&config.search)?;
    if search.has_api_key() {
        info!("Search client initialized ({})", config.search.base_url);
    } else {
        warn!("SEARCH_API_KEY is not set; every web search query will fail");
    }
    if config.llm.timeout_secs.is_none() {
        info!("No HTTP_TIMEOUT_SECS set; outbound calls wait for the upstream indefinitely");
    }

    let state = AppState {
        llm,
        search: Arc::new(search),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
