mod advisory;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod models;
mod readers;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::advisory::QwenAdvisor;
use crate::config::Config;
use crate::extraction::taxonomy::SkillTaxonomy;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Build the skill taxonomy up front so the first upload doesn't pay for it
    let taxonomy = SkillTaxonomy::builtin();
    info!(
        "Skill taxonomy loaded: {} skills, {} associations",
        taxonomy.entries().len(),
        taxonomy.associations().len()
    );

    // Initialize LLM client
    let llm = LlmClient::new(
        config.dashscope_api_key.clone(),
        config.dashscope_endpoint.clone(),
        config.advisory_max_retries,
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        config: config.clone(),
        advisor: Arc::new(QwenAdvisor(llm)),
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
