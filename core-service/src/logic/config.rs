//! Copilot Configuration
//!
//! Runtime settings for the pipeline, gathered from the environment.

use std::time::Duration;

use crate::constants;
use crate::logic::error_codes::ErrorThresholds;
use crate::logic::model::TrainingConfig;

#[derive(Debug, Clone)]
pub struct CopilotConfig {
    pub webhook_url: Option<String>,
    pub webhook_timeout: Duration,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub llm_timeout: Duration,
    /// Error code thresholds; `risk_high` is also the alert threshold
    pub thresholds: ErrorThresholds,
    pub training: TrainingConfig,
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            webhook_timeout: Duration::from_secs(constants::DEFAULT_WEBHOOK_TIMEOUT_SECS),
            openai_api_key: None,
            openai_model: constants::DEFAULT_OPENAI_MODEL.to_string(),
            gemini_api_key: None,
            gemini_model: constants::DEFAULT_GEMINI_MODEL.to_string(),
            llm_timeout: Duration::from_secs(constants::DEFAULT_LLM_TIMEOUT_SECS),
            thresholds: ErrorThresholds::default(),
            training: TrainingConfig::default(),
        }
    }
}

impl CopilotConfig {
    pub fn from_env() -> Self {
        Self {
            webhook_url: constants::get_webhook_url(),
            webhook_timeout: Duration::from_secs(constants::get_webhook_timeout_secs()),
            openai_api_key: constants::get_openai_api_key(),
            openai_model: constants::get_openai_model(),
            gemini_api_key: constants::get_gemini_api_key(),
            gemini_model: constants::get_gemini_model(),
            llm_timeout: Duration::from_secs(constants::get_llm_timeout_secs()),
            thresholds: ErrorThresholds::default()
                .with_risk_high(constants::get_alert_risk_threshold()),
            training: TrainingConfig::default(),
        }
    }

    pub fn alert_threshold(&self) -> u8 {
        self.thresholds.risk_high
    }
}
