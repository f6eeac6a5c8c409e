//! Notification Gate
//!
//! Decides whether an assessment is alert-worthy and builds the payload.
//! Delivery is someone else's job.

use chrono::Utc;
use serde_json::Value;

use super::types::{AlertDecision, AlertPayload, ALERT_TYPE, DEFAULT_EXPLANATION};
use crate::logic::error_codes::ErrorResolver;
use crate::logic::sensor::SensorReading;

/// Gate threshold is the resolver's high-risk threshold
#[derive(Debug, Clone, Default)]
pub struct NotificationGate {
    resolver: ErrorResolver,
}

impl NotificationGate {
    pub fn new(resolver: ErrorResolver) -> Self {
        Self { resolver }
    }

    pub fn threshold(&self) -> u8 {
        self.resolver.thresholds().risk_high
    }

    pub fn resolver(&self) -> &ErrorResolver {
        &self.resolver
    }

    pub fn should_trigger(&self, risk_score: u8) -> bool {
        risk_score >= self.threshold()
    }

    pub fn evaluate(
        &self,
        reading: &SensorReading,
        risk_score: u8,
        explanation: Option<Value>,
    ) -> AlertDecision {
        let threshold = self.threshold();

        if !self.should_trigger(risk_score) {
            log::debug!("Gate closed: risk {}% below threshold {}%", risk_score, threshold);
            return AlertDecision {
                triggered: false,
                message: format!("Risk ({}%) below threshold ({}%)", risk_score, threshold),
                risk_score,
                threshold,
                payload: None,
            };
        }

        let code = self.resolver.determine(reading, risk_score);
        let info = self.resolver.catalog().info(code);

        log::info!(
            "Gate open: risk {}% >= {}%, error code {} ({})",
            risk_score,
            threshold,
            code,
            info.description
        );

        let payload = AlertPayload {
            error_code: code,
            error_description: info.description,
            error_severity: info.severity,
            risk_score,
            alert_type: ALERT_TYPE.to_string(),
            timestamp: reading.timestamp.unwrap_or_else(Utc::now),
            sensor_data: reading.clone(),
            explanation: explanation
                .unwrap_or_else(|| Value::String(DEFAULT_EXPLANATION.to_string())),
        };

        AlertDecision {
            triggered: true,
            message: format!("Risk ({}%) at or above threshold ({}%)", risk_score, threshold),
            risk_score,
            threshold,
            payload: Some(payload),
        }
    }
}
