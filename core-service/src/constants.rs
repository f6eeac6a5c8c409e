//! Central Configuration Constants
//!
//! Single source of truth for configuration defaults.
//! Every value can be overridden from the environment (or a `.env` file).

/// Default webhook timeout (seconds)
pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 30;

/// Default LLM request timeout (seconds)
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Default chat model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";

/// Default alert threshold (risk %)
pub const DEFAULT_ALERT_RISK_THRESHOLD: u8 = 75;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Factory Copilot";

// ============================================
// Helper functions to read from env with fallback
// ============================================

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Workflow webhook URL, unset disables delivery
pub fn get_webhook_url() -> Option<String> {
    non_empty("N8N_WEBHOOK_URL")
}

pub fn get_webhook_timeout_secs() -> u64 {
    std::env::var("WEBHOOK_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_WEBHOOK_TIMEOUT_SECS)
}

/// `OPENAI_API_KEY`, then `OPENAI_KEY`
pub fn get_openai_api_key() -> Option<String> {
    non_empty("OPENAI_API_KEY").or_else(|| non_empty("OPENAI_KEY"))
}

pub fn get_openai_model() -> String {
    non_empty("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string())
}

/// `GEMINI_API_KEY`, then `GOOGLE_API_KEY`
pub fn get_gemini_api_key() -> Option<String> {
    non_empty("GEMINI_API_KEY").or_else(|| non_empty("GOOGLE_API_KEY"))
}

pub fn get_gemini_model() -> String {
    non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string())
}

pub fn get_llm_timeout_secs() -> u64 {
    std::env::var("LLM_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS)
}

/// Clamped to 0..=100
pub fn get_alert_risk_threshold() -> u8 {
    std::env::var("ALERT_RISK_THRESHOLD")
        .ok()
        .and_then(|s| s.trim().parse::<u8>().ok())
        .map(|v| v.min(100))
        .unwrap_or(DEFAULT_ALERT_RISK_THRESHOLD)
}
