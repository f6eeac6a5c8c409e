//! Explain Module
//!
//! Human-readable context for assessments: root cause and next step for one
//! reading, trend summaries for a history.

pub mod types;
pub mod llm;
pub mod engine;
pub mod trend;

pub use types::{
    ExplainError, Explanation, FeatureTrend, TrendAnalysis, TrendDirection, TrendStatus,
};
pub use llm::{GeminiClient, LlmClient, OpenAiClient};
pub use engine::{Explainer, ExplanationProvider, HeuristicExplainer, LlmExplainer};
pub use trend::TrendAnalyzer;
