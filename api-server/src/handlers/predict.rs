//! Risk prediction handler

use axum::{extract::State, Json};

use factory_copilot_core::{RiskAssessment, SensorPayload};

use crate::{AppResult, AppState};

/// Score a reading; every core field is required
pub async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<SensorPayload>,
) -> AppResult<Json<RiskAssessment>> {
    let reading = payload.into_reading()?;
    let assessment = state.copilot.predictor().predict_risk(&reading);

    tracing::debug!(risk = assessment.risk, "Prediction served");
    Ok(Json(assessment))
}
