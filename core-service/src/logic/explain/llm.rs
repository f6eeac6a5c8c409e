//! LLM Clients
//!
//! Blocking clients for an OpenAI-compatible chat endpoint and for Gemini.
//! Both sit behind `LlmClient` so callers can swap or stub them.

use std::time::Duration;

use super::types::{
    ChatMessage, ChatRequest, ChatResponse, ExplainError, GeminiContent, GeminiPart,
    GeminiRequest, GeminiResponse,
};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Sampling temperature for explanations
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Single-turn text completion
pub trait LlmClient: Send + Sync {
    fn name(&self) -> &str;
    fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, ExplainError>;
}

fn agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new().timeout(timeout).build()
}

// ============================================================================
// OPENAI
// ============================================================================

pub struct OpenAiClient {
    api_key: String,
    model: String,
    base_url: String,
    agent: ureq::Agent,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            api_key,
            model,
            base_url: OPENAI_BASE_URL.to_string(),
            agent: agent(timeout),
        }
    }

    /// Point at another OpenAI-compatible server
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl LlmClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, ExplainError> {
        if self.api_key.trim().is_empty() {
            return Err(ExplainError::NotConfigured(self.name().to_string()));
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));

        let request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(CHAT_TEMPERATURE),
        };
        let body = serde_json::to_string(&request)
            .map_err(|e| ExplainError::InvalidResponse(e.to_string()))?;

        log::debug!("Calling chat completions (model {}, prompt {} bytes)", self.model, prompt.len());

        let text = self
            .agent
            .post(&format!("{}/chat/completions", self.base_url))
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_string(&body)?
            .into_string()
            .map_err(|e| ExplainError::Transport(e.to_string()))?;

        let response: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ExplainError::InvalidResponse(e.to_string()))?;

        response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| ExplainError::InvalidResponse("empty choices".to_string()))
    }
}

// ============================================================================
// GEMINI
// ============================================================================

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    agent: ureq::Agent,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
            agent: agent(timeout),
        }
    }
}

impl LlmClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn complete(&self, system: Option<&str>, prompt: &str) -> Result<String, ExplainError> {
        if self.api_key.trim().is_empty() {
            return Err(ExplainError::NotConfigured(self.name().to_string()));
        }

        let text = match system {
            Some(system) => format!("{}\n\n{}", system, prompt),
            None => prompt.to_string(),
        };
        let request = GeminiRequest {
            contents: vec![GeminiContent { parts: vec![GeminiPart { text }] }],
        };
        let body = serde_json::to_string(&request)
            .map_err(|e| ExplainError::InvalidResponse(e.to_string()))?;

        log::debug!("Calling generateContent (model {})", self.model);

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let text = self
            .agent
            .post(&url)
            .query("key", &self.api_key)
            .set("Content-Type", "application/json")
            .send_string(&body)?
            .into_string()
            .map_err(|e| ExplainError::Transport(e.to_string()))?;

        let response: GeminiResponse = serde_json::from_str(&text)
            .map_err(|e| ExplainError::InvalidResponse(e.to_string()))?;

        let answer: String = response
            .candidates
            .first()
            .map(|c| c.content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();

        if answer.trim().is_empty() {
            return Err(ExplainError::InvalidResponse("no candidates".to_string()));
        }
        Ok(answer)
    }
}
