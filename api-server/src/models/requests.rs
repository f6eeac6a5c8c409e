//! Request bodies and query strings

use serde::Deserialize;
use validator::Validate;

use factory_copilot_core::SensorPayload;

#[derive(Debug, Deserialize, Validate)]
pub struct ErrorCodeRequest {
    pub sensor_data: SensorPayload,

    #[validate(range(min = 0.0, max = 100.0))]
    pub risk_score: f64,
}

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    #[serde(flatten)]
    pub sensor_data: SensorPayload,

    /// Passed through to the alert payload; the explainer runs when absent
    #[serde(default)]
    pub explanation: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SimulationMode {
    #[default]
    Normal,
    Failure,
}

#[derive(Debug, Deserialize, Validate, Default)]
pub struct SimulateQuery {
    #[serde(default)]
    pub mode: SimulationMode,

    #[validate(range(min = 0.0, max = 1.0))]
    pub progress: Option<f64>,

    pub history_length: Option<u64>,
}
