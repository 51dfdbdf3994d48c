mod access;
mod analysis;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod verdict;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails only on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Sincero API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize gateway client
    if config.gateway_api_key.is_none() {
        warn!("GATEWAY_API_KEY is not set; analysis requests will fail until it is configured");
    }
    let llm = LlmClient::new(
        config.gateway_api_key.clone(),
        config.gateway_url.clone(),
        config.gateway_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    if config.qa_overrides {
        warn!("QA_OVERRIDES enabled; ?plan= and ?qa= force paid views");
    }

    // Build app state
    let state = AppState::new(Arc::new(llm), config.clone());

    // Build router
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
