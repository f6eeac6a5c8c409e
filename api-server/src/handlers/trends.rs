//! Trend analysis handler

use axum::{extract::State, Json};

use factory_copilot_core::logic::explain::TrendAnalysis;
use factory_copilot_core::{SensorPayload, SensorReading};

use crate::{AppResult, AppState};

pub async fn analyze(
    State(state): State<AppState>,
    Json(history): Json<Vec<SensorPayload>>,
) -> AppResult<Json<TrendAnalysis>> {
    let readings = history
        .into_iter()
        .map(SensorPayload::into_reading)
        .collect::<Result<Vec<SensorReading>, _>>()?;

    let copilot = state.copilot.clone();
    let analysis = tokio::task::spawn_blocking(move || copilot.analyze_trends(&readings)).await?;

    Ok(Json(analysis))
}
