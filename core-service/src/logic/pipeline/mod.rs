//! Copilot Pipeline
//!
//! reading -> predictor -> resolver -> gate -> (explainer) -> transport
//!
//! Scoring and delivery are separate outcomes: a failed delivery never
//! hides the assessment.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logic::config::CopilotConfig;
use crate::logic::error_codes::{ErrorInfo, ErrorResolver};
use crate::logic::explain::{
    Explainer, Explanation, GeminiClient, LlmExplainer, OpenAiClient, TrendAnalysis, TrendAnalyzer,
};
use crate::logic::model::{FeatureImportance, RiskPredictor, TrainingReport};
use crate::logic::response::{
    AlertDecision, AlertTransport, DeliveryOutcome, NotificationGate, WebhookTransport,
};
use crate::logic::sensor::SensorReading;

// ============================================================================
// RESULTS
// ============================================================================

/// Score, error code and gate verdict for one reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub risk: u8,
    pub feature_importance: FeatureImportance,
    pub error: ErrorInfo,
    pub alert: AlertDecision,
}

/// Assessment plus what happened downstream of the gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedReading {
    pub assessment: Assessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
    /// `None` when the gate stayed closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryOutcome>,
}

// ============================================================================
// COPILOT
// ============================================================================

pub struct Copilot {
    predictor: RiskPredictor,
    gate: NotificationGate,
    explainer: Explainer,
    trends: TrendAnalyzer,
    transport: Option<Box<dyn AlertTransport>>,
}

impl Default for Copilot {
    fn default() -> Self {
        Self::from_config(&CopilotConfig::default())
    }
}

impl Copilot {
    pub fn from_config(config: &CopilotConfig) -> Self {
        let explainer = match &config.openai_api_key {
            Some(key) => Explainer::with_provider(Box::new(LlmExplainer::new(Box::new(
                OpenAiClient::new(key.clone(), config.openai_model.clone(), config.llm_timeout),
            )))),
            None => Explainer::heuristic(),
        };

        let trends = match &config.gemini_api_key {
            Some(key) => TrendAnalyzer::with_client(Box::new(GeminiClient::new(
                key.clone(),
                config.gemini_model.clone(),
                config.llm_timeout,
            ))),
            None => TrendAnalyzer::heuristic(),
        };

        let webhook = WebhookTransport::new(config.webhook_url.clone(), config.webhook_timeout);
        if let Some(url) = webhook.url() {
            log::debug!("Alerts will be posted to {}", url);
        }
        let transport: Option<Box<dyn AlertTransport>> = if webhook.is_configured() {
            Some(Box::new(webhook))
        } else {
            None
        };

        log::info!(
            "Copilot configured: explainer={}, trends={}, webhook={}, alert threshold={}%",
            explainer.provider_name(),
            if trends.is_llm_backed() { "gemini" } else { "heuristic" },
            if transport.is_some() { "on" } else { "off" },
            config.alert_threshold()
        );

        Self {
            predictor: RiskPredictor::with_config(config.training.clone()),
            gate: NotificationGate::new(ErrorResolver::new(config.thresholds)),
            explainer,
            trends,
            transport,
        }
    }

    pub fn with_transport(mut self, transport: Box<dyn AlertTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_explainer(mut self, explainer: Explainer) -> Self {
        self.explainer = explainer;
        self
    }

    pub fn with_trend_analyzer(mut self, trends: TrendAnalyzer) -> Self {
        self.trends = trends;
        self
    }

    pub fn predictor(&self) -> &RiskPredictor {
        &self.predictor
    }

    pub fn gate(&self) -> &NotificationGate {
        &self.gate
    }

    pub fn resolver(&self) -> &ErrorResolver {
        self.gate.resolver()
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// Train now instead of on the first prediction
    pub fn warm_up(&self) -> Option<TrainingReport> {
        self.predictor.ensure_trained();
        self.predictor.training_report()
    }

    pub fn assess(&self, reading: &SensorReading) -> Assessment {
        self.assess_with_explanation(reading, None)
    }

    /// `explanation` is passed through to the alert payload untouched
    pub fn assess_with_explanation(
        &self,
        reading: &SensorReading,
        explanation: Option<Value>,
    ) -> Assessment {
        let scored = self.predictor.predict_risk(reading);
        let error = self.resolver().resolve(reading, scored.risk);
        let alert = self.gate.evaluate(reading, scored.risk, explanation);

        Assessment {
            risk: scored.risk,
            feature_importance: scored.feature_importance,
            error,
            alert,
        }
    }

    pub fn process(&self, reading: &SensorReading) -> ProcessedReading {
        self.process_with_explanation(reading, None)
    }

    /// Assess, explain if the gate opens, then deliver.
    ///
    /// A caller-supplied explanation replaces the explainer.
    pub fn process_with_explanation(
        &self,
        reading: &SensorReading,
        explanation: Option<Value>,
    ) -> ProcessedReading {
        let scored = self.predictor.predict_risk(reading);

        let mut generated = None;
        let explanation = match explanation {
            Some(supplied) => Some(supplied),
            None if self.gate.should_trigger(scored.risk) => {
                let written = self.explainer.explain(&scored, reading);
                let value = serde_json::to_value(&written).ok();
                generated = Some(written);
                value
            }
            None => None,
        };

        let error = self.resolver().resolve(reading, scored.risk);
        let alert = self.gate.evaluate(reading, scored.risk, explanation);

        let delivery = alert.payload.as_ref().map(|payload| match &self.transport {
            Some(transport) => {
                let outcome = transport.deliver(payload);
                log::info!("Alert via {}: {}", transport.name(), outcome.message());
                outcome
            }
            None => DeliveryOutcome::NotConfigured,
        });

        ProcessedReading {
            assessment: Assessment {
                risk: scored.risk,
                feature_importance: scored.feature_importance,
                error,
                alert,
            },
            explanation: generated,
            delivery,
        }
    }

    /// Send a test message through the configured transport
    pub fn test_transport(&self) -> DeliveryOutcome {
        match &self.transport {
            Some(transport) => {
                let outcome = transport.check();
                log::info!("Transport check via {}: {}", transport.name(), outcome.message());
                outcome
            }
            None => DeliveryOutcome::NotConfigured,
        }
    }

    pub fn explain(&self, reading: &SensorReading) -> Explanation {
        let scored = self.predictor.predict_risk(reading);
        self.explainer.explain(&scored, reading)
    }

    pub fn analyze_trends(&self, history: &[SensorReading]) -> TrendAnalysis {
        self.trends.analyze(history)
    }
}

#[cfg(test)]
mod tests;
