mod config;
mod db;
mod errors;
mod export;
mod extraction;
mod llm_client;
mod models;
mod notify;
mod routes;
mod screening;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::extraction::ocr::{OcrEngine, TesseractOcr};
use crate::extraction::pdf::PdfTextExtractor;
use crate::llm_client::LlmClient;
use crate::notify::smtp::SmtpNotifier;
use crate::notify::{DisabledNotifier, Notifier};
use crate::routes::build_router;
use crate::screening::field_extractor::LlmFieldExtractor;
use crate::screening::pipeline::{PipelineSettings, ScreeningPipeline};
use crate::state::AppState;
use crate::store::postgres::PgCandidateStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
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

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgCandidateStore::new(db));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let field_extractor = Arc::new(LlmFieldExtractor::new(llm));

    let ocr: Option<Box<dyn OcrEngine>> = if !config.ocr_enabled {
        info!("OCR fallback disabled");
        None
    } else if TesseractOcr::is_available().await {
        info!("OCR fallback enabled (lang: {})", config.tesseract_lang);
        Some(Box::new(TesseractOcr::new(config.tesseract_lang.clone())))
    } else {
        warn!("OCR fallback requested but pdftoppm/tesseract were not found on PATH");
        None
    };
    let text_extractor = Arc::new(PdfTextExtractor::new(ocr));

    let notifier = build_notifier(&config);

    let pipeline = ScreeningPipeline::new(
        text_extractor,
        field_extractor,
        notifier,
        store.clone(),
        PipelineSettings {
            shortlist_threshold: config.shortlist_threshold,
            max_upload_bytes: config.max_upload_bytes,
        },
    );
    info!(
        "Screening pipeline ready (shortlist threshold: {:.1}%)",
        pipeline.shortlist_threshold()
    );

    // Build app state
    let state = AppState {
        store,
        pipeline: Arc::new(pipeline),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// SMTP when configured; otherwise notifications are disabled and screening
/// still runs.
fn build_notifier(config: &Config) -> Arc<dyn Notifier> {
    let Some(settings) = &config.smtp else {
        warn!("SMTP_HOST/MAIL_FROM not set, email notifications disabled");
        return Arc::new(DisabledNotifier);
    };

    match SmtpNotifier::new(settings) {
        Ok(notifier) => {
            info!("SMTP notifier initialized (relay: {})", settings.host);
            Arc::new(notifier)
        }
        Err(e) => {
            warn!("Invalid SMTP settings, email notifications disabled: {e}");
            Arc::new(DisabledNotifier)
        }
    }
}
