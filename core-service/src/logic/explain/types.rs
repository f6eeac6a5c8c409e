//! Explanation Types
//!
//! Outputs of explanation providers plus the wire formats of the chat APIs
//! they call.

use serde::{Deserialize, Serialize};

// ============================================================================
// EXPLANATION
// ============================================================================

/// Root cause and next step for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub root_cause: String,
    pub recommended_action: String,
    /// Which provider wrote it
    pub provider: String,
}

// ============================================================================
// TREND ANALYSIS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
        }
    }
}

/// Current / mean / direction of one signal over a history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureTrend {
    pub current: f64,
    pub average: f64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    /// Written by an LLM
    Analyzed,
    /// Rule-based fallback
    Heuristic,
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub summary: String,
    pub anomalies: Vec<String>,
    pub status: TrendStatus,
    pub readings: usize,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ExplainError {
    /// No API key
    NotConfigured(String),
    /// Provider answered with a non-2xx status
    Http { status: u16, body: String },
    /// Network / timeout
    Transport(String),
    /// Response did not have the expected shape
    InvalidResponse(String),
}

impl std::fmt::Display for ExplainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExplainError::NotConfigured(provider) => write!(f, "{} is not configured", provider),
            ExplainError::Http { status, body } => write!(f, "HTTP {}: {}", status, body),
            ExplainError::Transport(message) => write!(f, "Transport error: {}", message),
            ExplainError::InvalidResponse(message) => write!(f, "Invalid response: {}", message),
        }
    }
}

impl std::error::Error for ExplainError {}

impl From<ureq::Error> for ExplainError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, resp) => ExplainError::Http {
                status,
                body: resp.into_string().unwrap_or_default(),
            },
            ureq::Error::Transport(transport) => ExplainError::Transport(transport.to_string()),
        }
    }
}

// ============================================================================
// CHAT COMPLETIONS (OpenAI compatible)
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self { role: "system".to_string(), content: content.to_string() }
    }

    pub fn user(content: &str) -> Self {
        Self { role: "user".to_string(), content: content.to_string() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

// ============================================================================
// GENERATE CONTENT (Gemini)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
}
