//! Phishing Guard Prediction Server
//!
//! Classifies 40-feature vectors as phishing or legitimate.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      PHISHING GUARD                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  POST /predict ──► validate ──► scale ──► CNN ──► verdict    │
//! │      (Axum)          (1,40)    (scaler)  (ONNX)   (>= 0.5)   │
//! │                                   ▲        ▲                 │
//! │                                   └────┬───┘                 │
//! │                          artifacts loaded once at startup    │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod constants;
mod error;
mod handlers;
mod inference;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::inference::{ArtifactReport, LoadedArtifacts, Predictor};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Phishing Guard starting...");
    tracing::info!(
        "Model: {}, scaler: {}",
        config.model_path.display(),
        config.scaler_path.display()
    );

    // Load artifacts (failures degrade, never abort)
    let artifacts = LoadedArtifacts::load(&config);

    // Build application state
    let state = AppState::new(artifacts);

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing(config: &config::Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| constants::DEFAULT_LOG_FILTER.into());
    let json = config.is_production();

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub artifacts: Arc<ArtifactReport>,
}

impl AppState {
    pub fn new(loaded: LoadedArtifacts) -> Self {
        Self {
            predictor: Arc::new(Predictor::new(loaded.classifier, loaded.scaler)),
            artifacts: Arc::new(loaded.report),
        }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
