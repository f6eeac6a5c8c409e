//! Response bodies

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use factory_copilot_core::ProcessedReading;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_trained: bool,
    pub model_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    pub webhook_configured: bool,
    pub environment: String,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct AssessResponse {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: ProcessedReading,
}
