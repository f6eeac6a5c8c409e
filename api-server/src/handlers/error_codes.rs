//! Error code handlers

use axum::{extract::{Path, State}, Json};
use validator::Validate;

use factory_copilot_core::ErrorInfo;

use crate::models::ErrorCodeRequest;
use crate::{AppResult, AppState};

/// Resolve the error code for a reading and a known risk score
pub async fn resolve(
    State(state): State<AppState>,
    Json(req): Json<ErrorCodeRequest>,
) -> AppResult<Json<ErrorInfo>> {
    req.validate()?;
    let reading = req.sensor_data.into_reading()?;
    let risk_score = req.risk_score.floor() as u8;

    Ok(Json(state.copilot.resolver().resolve(&reading, risk_score)))
}

pub async fn list(State(state): State<AppState>) -> Json<Vec<ErrorInfo>> {
    Json(state.copilot.resolver().catalog().all())
}

/// Unknown codes get the placeholder entry
pub async fn get(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Json<ErrorInfo> {
    Json(state.copilot.resolver().catalog().lookup(&code))
}
