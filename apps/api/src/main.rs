mod config;
mod errors;
mod interview;
mod llm_client;
mod ocr;
mod resume;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::generator::GenerationSettings;
use crate::llm_client::LlmClient;
use crate::ocr::{OcrEngine, TencentOcrClient};
use crate::resume::PdfTextExtractor;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; fails only on malformed values
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(&config)?;
    if config.openrouter_api_key.is_none() {
        warn!("OPENROUTER_API_KEY is not set; generation requests will fail");
    }
    info!(
        "LLM client initialized (model: {}, base url: {})",
        config.llm_model, config.openrouter_base_url
    );

    // Initialize OCR engine (disabled without vendor credentials)
    let ocr = TencentOcrClient::from_config(&config).map(|client| {
        info!(
            "OCR engine initialized (region: {}, endpoint: {})",
            config.tencent_ocr_region, config.tencent_ocr_endpoint
        );
        Arc::new(client) as Arc<dyn OcrEngine>
    });
    if ocr.is_none() {
        warn!("Tencent OCR credentials are not set; /api/ocr will fail");
    }

    // Build app state
    let state = AppState {
        llm,
        generation: GenerationSettings::from_config(&config),
        config: config.clone(),
        ocr,
        documents: Arc::new(PdfTextExtractor),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
