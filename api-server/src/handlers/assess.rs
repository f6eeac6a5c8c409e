//! Full pipeline handler

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::models::{AssessRequest, AssessResponse};
use crate::{AppResult, AppState};

/// Score, resolve, gate, and deliver a triggered alert.
///
/// Delivery problems are reported inside the body; the request still succeeds.
pub async fn assess(
    State(state): State<AppState>,
    Json(req): Json<AssessRequest>,
) -> AppResult<Json<AssessResponse>> {
    let reading = req.sensor_data.into_reading()?;
    let explanation = req.explanation;
    let copilot = state.copilot.clone();

    let result = tokio::task::spawn_blocking(move || {
        copilot.process_with_explanation(&reading, explanation)
    })
    .await?;

    let id = Uuid::new_v4();
    tracing::info!(
        %id,
        risk = result.assessment.risk,
        code = %result.assessment.error.code,
        triggered = result.assessment.alert.triggered,
        delivery = result.delivery.as_ref().map(|d| d.as_str()).unwrap_or("none"),
        "Assessment completed"
    );

    Ok(Json(AssessResponse {
        id,
        received_at: chrono::Utc::now(),
        result,
    }))
}
