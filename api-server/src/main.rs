//! Factory Copilot API Server
//!
//! HTTP front for the downtime risk pipeline.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     FACTORY COPILOT API                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌─────────────────────┐  │
//! │  │  Axum     │──▶│  Copilot     │──▶│  Webhook (n8n)      │  │
//! │  │  Router   │   │  pipeline    │   │  LLM explainers     │  │
//! │  └───────────┘   └──────┬───────┘   └─────────────────────┘  │
//! │                         ▼                                    │
//! │                 ┌───────────────┐                            │
//! │                 │ Random forest │  (trained at startup)      │
//! │                 └───────────────┘                            │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

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

use factory_copilot_core::Copilot;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging (log records from the core are bridged in)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "factory_copilot_api=debug,factory_copilot_core=info,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    tracing::info!("Factory Copilot API starting ({})...", config.environment);
    if !config.is_production() && config.copilot.webhook_url.is_none() {
        tracing::warn!("N8N_WEBHOOK_URL not set, alerts will not be delivered");
    }

    // Train before accepting requests
    let copilot = Arc::new(Copilot::from_config(&config.copilot));
    let warm = copilot.clone();
    if let Some(report) = tokio::task::spawn_blocking(move || warm.warm_up()).await? {
        tracing::info!(
            "Model ready: {} ({} trees), accuracy {:.3}",
            report.model_type,
            report.n_estimators,
            report.accuracy
        );
    }

    let state = AppState::new(copilot, config.clone());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub copilot: Arc<Copilot>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(copilot: Arc<Copilot>, config: config::Config) -> Self {
        Self { copilot, config }
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))

        // Scoring
        .route("/predict", post(handlers::predict::predict))
        .route("/assess", post(handlers::assess::assess))

        // Error codes
        .route("/error-code", post(handlers::error_codes::resolve))
        .route("/error-codes", get(handlers::error_codes::list))
        .route("/error-codes/:code", get(handlers::error_codes::get))

        // Simulation & trends
        .route("/simulate", get(handlers::simulate::simulate))
        .route("/trends", post(handlers::trends::analyze))

        // Automation
        .route("/webhook/test", post(handlers::webhook::test))

        .fallback(handlers::not_found)
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
