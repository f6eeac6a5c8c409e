//! Explanation Engine
//!
//! Turns a risk assessment into a root cause and a recommended action.
//! An LLM writes it when one is configured; otherwise the heuristic names
//! the most important feature.

use super::llm::LlmClient;
use super::types::{ExplainError, Explanation};
use crate::logic::model::RiskAssessment;
use crate::logic::sensor::SensorReading;

pub const SYSTEM_PROMPT: &str =
    "You are an expert industrial maintenance engineer analyzing machine sensor data.";

const ACTION_MARKER: &str = "Recommended Action:";
const DEFAULT_ACTION: &str = "Monitor sensor readings and schedule maintenance.";

// ============================================================================
// PROVIDER TRAIT
// ============================================================================

pub trait ExplanationProvider: Send + Sync {
    fn name(&self) -> &str;
    fn explain(
        &self,
        assessment: &RiskAssessment,
        reading: &SensorReading,
    ) -> Result<Explanation, ExplainError>;
}

// ============================================================================
// HEURISTIC
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExplainer;

impl ExplanationProvider for HeuristicExplainer {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn explain(
        &self,
        assessment: &RiskAssessment,
        _reading: &SensorReading,
    ) -> Result<Explanation, ExplainError> {
        let risk = assessment.risk;
        let top = assessment
            .feature_importance
            .ranked()
            .into_iter()
            .find(|(_, weight)| *weight > 0.0);

        let (root_cause, recommended_action) = match top {
            Some((feature, _)) => (
                format!(
                    "High risk ({}%) detected. Primary concern: {} is outside normal range. \
                     Temperature and vibration patterns suggest potential bearing wear or mechanical stress.",
                    risk, feature
                ),
                format!(
                    "Inspect {} immediately. Consider reducing machine load or scheduling preventive maintenance.",
                    feature
                ),
            ),
            None => (
                format!("Downtime risk is {}%. Monitor sensor readings closely.", risk),
                "Review sensor trends and schedule maintenance if risk continues to increase."
                    .to_string(),
            ),
        };

        Ok(Explanation {
            root_cause,
            recommended_action,
            provider: self.name().to_string(),
        })
    }
}

// ============================================================================
// LLM
// ============================================================================

pub struct LlmExplainer {
    client: Box<dyn LlmClient>,
}

impl LlmExplainer {
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self { client }
    }
}

impl ExplanationProvider for LlmExplainer {
    fn name(&self) -> &str {
        self.client.name()
    }

    fn explain(
        &self,
        assessment: &RiskAssessment,
        reading: &SensorReading,
    ) -> Result<Explanation, ExplainError> {
        let prompt = build_prompt(assessment, reading);
        let answer = self.client.complete(Some(SYSTEM_PROMPT), &prompt)?;
        let (root_cause, recommended_action) = split_answer(&answer);

        Ok(Explanation {
            root_cause,
            recommended_action,
            provider: self.name().to_string(),
        })
    }
}

fn build_prompt(assessment: &RiskAssessment, reading: &SensorReading) -> String {
    let factors: Vec<String> = assessment
        .feature_importance
        .ranked()
        .into_iter()
        .take(3)
        .map(|(name, weight)| format!("- {}: {:.1}%", name, weight * 100.0))
        .collect();

    format!(
        "Analyze this machine downtime risk prediction:\n\n\
         Risk Score: {}%\n\
         Sensor Readings:\n\
         - Temperature: {}°C\n\
         - Vibration: {} mm/s\n\
         - Cycle Time: {}s\n\
         - Error Count: {}\n\n\
         Key Contributing Factors:\n{}\n\n\
         Provide:\n\
         1. Root Cause Analysis: What is likely causing the high downtime risk?\n\
         2. Recommended Action: What should the operator do immediately?\n\n\
         Keep responses concise (2-3 sentences each) and actionable.",
        assessment.risk,
        reading.temperature,
        reading.vibration,
        reading.cycle_time,
        reading.error_count,
        factors.join("\n")
    )
}

/// "Root Cause: ... Recommended Action: ..." -> (cause, action)
fn split_answer(answer: &str) -> (String, String) {
    let (cause, action) = match answer.split_once(ACTION_MARKER) {
        Some((cause, action)) => (cause, action.trim()),
        None => (answer, ""),
    };

    let cause = cause
        .replace("Root Cause Analysis:", "")
        .replace("Root Cause:", "")
        .trim()
        .to_string();
    let action = if action.is_empty() { DEFAULT_ACTION.to_string() } else { action.to_string() };

    (cause, action)
}

// ============================================================================
// FACADE
// ============================================================================

/// Primary provider with heuristic fallback
pub struct Explainer {
    primary: Option<Box<dyn ExplanationProvider>>,
    fallback: HeuristicExplainer,
}

impl Default for Explainer {
    fn default() -> Self {
        Self::heuristic()
    }
}

impl Explainer {
    pub fn heuristic() -> Self {
        Self { primary: None, fallback: HeuristicExplainer }
    }

    pub fn with_provider(provider: Box<dyn ExplanationProvider>) -> Self {
        Self { primary: Some(provider), fallback: HeuristicExplainer }
    }

    pub fn provider_name(&self) -> &str {
        self.primary
            .as_deref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    /// Never fails; provider errors fall back to the heuristic
    pub fn explain(&self, assessment: &RiskAssessment, reading: &SensorReading) -> Explanation {
        if let Some(primary) = &self.primary {
            match primary.explain(assessment, reading) {
                Ok(explanation) => return explanation,
                Err(e) => {
                    log::warn!("{} explanation failed ({}), using heuristic", primary.name(), e)
                }
            }
        }

        match self.fallback.explain(assessment, reading) {
            Ok(explanation) => explanation,
            Err(_) => Explanation {
                root_cause: format!("Downtime risk is {}%.", assessment.risk),
                recommended_action: DEFAULT_ACTION.to_string(),
                provider: self.fallback.name().to_string(),
            },
        }
    }
}
