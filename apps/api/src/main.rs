mod config;
mod errors;
mod export;
mod llm_client;
mod models;
mod polish;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::ExportService;
use crate::llm_client::LlmClient;
use crate::polish::{LlmPolisher, ResumePolisher, UnconfiguredPolisher};
use crate::routes::build_router;
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

    info!("Starting folio v{}", env!("CARGO_PKG_VERSION"));

    let polisher: Arc<dyn ResumePolisher> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(LlmPolisher(llm))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; /api/v1/resumes/polish will report POLISH_NOT_CONFIGURED");
            Arc::new(UnconfiguredPolisher)
        }
    };

    let state = AppState {
        config: config.clone(),
        exporter: ExportService::default(),
        polisher,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());
    let app = if config.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
