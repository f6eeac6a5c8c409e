//! Response Types
//!
//! Alert payload, gate verdict, and delivery outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logic::error_codes::{ErrorCode, Severity};
use crate::logic::sensor::SensorReading;

/// Alert type carried by every payload
pub const ALERT_TYPE: &str = "high_downtime_risk";

/// Explanation used when none was supplied
pub const DEFAULT_EXPLANATION: &str = "High downtime risk detected";

// ============================================================================
// ALERT PAYLOAD
// ============================================================================

/// JSON body posted to the workflow webhook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub error_code: ErrorCode,
    pub error_description: String,
    pub error_severity: Severity,
    pub risk_score: u8,
    pub alert_type: String,
    pub timestamp: DateTime<Utc>,
    pub sensor_data: SensorReading,
    /// Free text or a structured object, passed through untouched
    pub explanation: Value,
}

// ============================================================================
// GATE VERDICT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertDecision {
    pub triggered: bool,
    pub message: String,
    pub risk_score: u8,
    pub threshold: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<AlertPayload>,
}

// ============================================================================
// DELIVERY
// ============================================================================

/// What happened to one delivery attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    /// 2xx
    Delivered {
        status_code: u16,
        body: String,
        #[serde(default)]
        response: WorkflowResponse,
    },
    /// Non-2xx
    Rejected { status_code: u16, body: String },
    TimedOut { timeout_secs: u64 },
    TransportError { message: String },
    NotConfigured,
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOutcome::Delivered { .. } => "delivered",
            DeliveryOutcome::Rejected { .. } => "rejected",
            DeliveryOutcome::TimedOut { .. } => "timed_out",
            DeliveryOutcome::TransportError { .. } => "transport_error",
            DeliveryOutcome::NotConfigured => "not_configured",
        }
    }

    /// One-line summary for logs and API replies
    pub fn message(&self) -> String {
        match self {
            DeliveryOutcome::Delivered { .. } => "Maintenance alert triggered successfully".to_string(),
            DeliveryOutcome::Rejected { status_code, .. } => {
                format!("Webhook returned status {}", status_code)
            }
            DeliveryOutcome::TimedOut { timeout_secs } => {
                format!("Webhook request timed out after {}s", timeout_secs)
            }
            DeliveryOutcome::TransportError { message } => {
                format!("Webhook request failed: {}", message)
            }
            DeliveryOutcome::NotConfigured => "Webhook not configured".to_string(),
        }
    }
}

// ============================================================================
// WORKFLOW RESPONSE
// ============================================================================

/// Fields a workflow engine may echo back
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub ai_output: Option<String>,
    pub execution_id: Option<String>,
    pub workflow_id: Option<String>,
}

const TEXT_KEYS: [&str; 4] = ["output", "text", "response", "message"];

impl WorkflowResponse {
    /// Best-effort read of a reply body; shapes it does not know give `None`
    pub fn extract(value: &Value) -> WorkflowResponse {
        WorkflowResponse {
            ai_output: extract_text(value),
            execution_id: scalar_string(value.get("executionId")),
            workflow_id: scalar_string(value.get("workflowId")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ai_output.is_none() && self.execution_id.is_none() && self.workflow_id.is_none()
    }
}

fn extract_text(value: &Value) -> Option<String> {
    // [[{ "json": { "output": ... } }]]
    if let Some(json) = value.pointer("/output/0/0/json") {
        if let Some(text) = first_text(json, &TEXT_KEYS) {
            return Some(text);
        }
    }

    if let Some(Value::String(text)) = value.get("output") {
        return Some(text.clone());
    }

    first_text(value, &TEXT_KEYS[1..])
}

fn first_text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(|v| v.as_str().map(str::to_string))
}

fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
