//! DDoS Shield API Server
//!
//! HTTP front for the traffic classification core.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      DDOS SHIELD API                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  POST /predict ──► spool upload ──► ClassificationService    │
//! │                                      │ (spawn_blocking)      │
//! │                                      ▼                       │
//! │                              ResultStore (staging CSV)       │
//! │                                      │                       │
//! │  POST /block ─────────────► ReportMaterializer ──► Reports/  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ddos_shield_core::{
    load_classifier, ChunkedInferenceEngine, ClassificationService, ReportMaterializer, ResultStore,
};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("DDoS Shield API starting...");
    tracing::info!("Model: {}", config.model_path.display());
    tracing::info!("Staging: {}", config.staging_dir.display());
    tracing::info!("Reports: {}", config.reports_dir.display());

    let service = build_service(&config)?;

    let state = AppState {
        service: Arc::new(service),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    state.service.shutdown();
    tracing::info!("Server stopped");

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "ddos_shield_server=debug,ddos_shield_core=info,tower_http=debug".into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Load the model and assemble the classification service
fn build_service(config: &config::Config) -> anyhow::Result<ClassificationService> {
    let model = load_classifier(&config.model_path).context("Failed to load classifier")?;

    let engine = ChunkedInferenceEngine::new(model.classifier.into(), &config.engine_config())
        .context("Invalid engine configuration")?;
    let store = ResultStore::new(&config.staging_dir).context("Failed to prepare staging directory")?;
    let reports = ReportMaterializer::with_defaults(&config.reports_dir);

    Ok(ClassificationService::new(engine, store, reports))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ClassificationService>,
    pub config: Arc<config::Config>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::health::index))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/block", post(handlers::block::block))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
