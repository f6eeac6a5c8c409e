//! Health check handlers

use axum::{extract::State, Json};

use factory_copilot_core::constants::{APP_NAME, APP_VERSION};
use factory_copilot_core::logic::model::MODEL_TYPE;

use crate::models::{HealthResponse, ServiceInfo};
use crate::AppState;

pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "healthy",
        service: APP_NAME,
        version: APP_VERSION,
    })
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let predictor = state.copilot.predictor();
    Json(HealthResponse {
        status: "healthy",
        model_trained: predictor.is_trained(),
        model_type: MODEL_TYPE,
        accuracy: predictor.training_report().map(|r| r.accuracy),
        webhook_configured: state.copilot.has_transport(),
        environment: state.config.environment.clone(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
