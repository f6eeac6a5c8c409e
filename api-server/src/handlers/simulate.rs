//! Synthetic reading handler

use axum::{extract::Query, Json};
use validator::Validate;

use factory_copilot_core::{SensorGenerator, SensorReading};

use crate::models::{SimulateQuery, SimulationMode};
use crate::AppResult;

pub async fn simulate(Query(query): Query<SimulateQuery>) -> AppResult<Json<SensorReading>> {
    query.validate()?;

    let history_length = query.history_length.unwrap_or(0);
    let mut generator = SensorGenerator::new();

    let reading = match query.mode {
        SimulationMode::Normal => generator.normal(history_length),
        SimulationMode::Failure => generator.failure(query.progress.unwrap_or(0.0), history_length),
    };

    Ok(Json(reading))
}
