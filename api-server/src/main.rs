//! Wildfire Risk Predictor - HTTP Server
//!
//! Serves reference data and wildfire risk predictions over JSON.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    WILDFIRE API                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────────────────────────────┐  │
//! │  │  Router   │──▶│  Predictor (blocking pool)           │  │
//! │  │  (Axum)   │   │  resolve → encode → classify         │  │
//! │  └───────────┘   └───────┬───────────────────┬──────────┘  │
//! │                          ▼                   ▼             │
//! │                   ┌────────────┐     ┌──────────────┐      │
//! │                   │ Geocoder   │     │ Artifacts    │      │
//! │                   │ (HTTP)     │     │ (loaded once)│      │
//! │                   └────────────┘     └──────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;


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
use wildfire_core::constants;
use wildfire_core::logic::artifacts::{self, ArtifactError};
use wildfire_core::logic::location::{LocationResolver, NominatimGeocoder};
use wildfire_core::{InferenceFailure, Predictor};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (also receives `log` records from the core)
    let production = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "wildfire_api=debug,wildfire_core=info,tower_http=debug".into()))
        .with(production.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!production).then(|| tracing_subscriber::fmt::layer()))
        .init();

    tracing::info!("{} v{} starting...", constants::APP_NAME, constants::APP_VERSION);
    tracing::info!("Artifacts: {}", config.artifacts_dir.display());
    tracing::info!("Geocoder: {}", config.geocoder.url);

    // Load artifacts once. Without them the server still answers health and
    // reference requests; predictions report the load failure.
    let pipeline = artifacts::init_bundle(&config.artifacts_dir).map(|bundle| {
        let geocoder = NominatimGeocoder::new(config.geocoder.clone());
        Predictor::new(bundle, LocationResolver::new(Arc::new(geocoder)))
    });

    match &pipeline {
        Ok(predictor) => tracing::info!("Model ready: {:?}", predictor.bundle()),
        Err(e) => tracing::error!("Predictions disabled, artifacts failed to load: {}", e),
    }

    // Build application state
    let state = AppState {
        pipeline,
        config: config.clone(),
    };

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

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Ready predictor, or the reason artifacts could not be loaded
    pub pipeline: Result<Predictor, ArtifactError>,
    pub config: config::Config,
}

impl AppState {
    pub fn predictor(&self) -> AppResult<&Predictor> {
        self.pipeline
            .as_ref()
            .map_err(|e| AppError::Inference(InferenceFailure::from(e.clone())))
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/reference", get(handlers::reference::get))
        .route("/api/v1/reference/states/:state/cities", get(handlers::reference::cities))
        .route("/api/v1/model", get(handlers::model::status))
        .route("/api/v1/predict", post(handlers::predict::predict))
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
