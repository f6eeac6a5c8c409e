//! Webhook connectivity check

use axum::{extract::State, Json};

use factory_copilot_core::DeliveryOutcome;

use crate::{AppResult, AppState};

/// Post a test message to the alert webhook and report what came back
pub async fn test(State(state): State<AppState>) -> AppResult<Json<DeliveryOutcome>> {
    let copilot = state.copilot.clone();
    let outcome = tokio::task::spawn_blocking(move || copilot.test_transport()).await?;

    tracing::info!(status = outcome.as_str(), "Webhook test finished");
    Ok(Json(outcome))
}
