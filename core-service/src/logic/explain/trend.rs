//! Trend Analyzer
//!
//! Summarises a window of readings. With an LLM client configured the
//! summary is written by the model and scanned for anomaly keywords;
//! otherwise simple rules report direction and hot spots.

use super::llm::LlmClient;
use super::types::{FeatureTrend, TrendAnalysis, TrendDirection, TrendStatus};
use crate::logic::sensor::SensorReading;

/// Below this many readings the LLM is not consulted
pub const MIN_LLM_READINGS: usize = 5;

/// °C, latest reading above this is flagged
pub const TREND_TEMPERATURE_ALERT: f64 = 85.0;

/// mm/s, latest reading above this is flagged
pub const TREND_VIBRATION_ALERT: f64 = 5.0;

#[derive(Default)]
pub struct TrendAnalyzer {
    client: Option<Box<dyn LlmClient>>,
}

impl TrendAnalyzer {
    pub fn heuristic() -> Self {
        Self { client: None }
    }

    pub fn with_client(client: Box<dyn LlmClient>) -> Self {
        Self { client: Some(client) }
    }

    pub fn is_llm_backed(&self) -> bool {
        self.client.is_some()
    }

    pub fn analyze(&self, history: &[SensorReading]) -> TrendAnalysis {
        let Some(client) = self.client.as_deref() else {
            return fallback(history);
        };
        if history.len() < MIN_LLM_READINGS {
            return fallback(history);
        }

        let prompt = build_prompt(history);
        match client.complete(None, &prompt) {
            Ok(summary) => TrendAnalysis {
                anomalies: extract_anomalies(&summary),
                summary,
                status: TrendStatus::Analyzed,
                readings: history.len(),
            },
            Err(e) => {
                log::warn!("{} trend analysis failed ({}), using heuristic", client.name(), e);
                fallback(history)
            }
        }
    }
}

/// Direction compares the last reading to the first
fn trend_of(history: &[SensorReading], field: fn(&SensorReading) -> f64, flat: TrendDirection) -> FeatureTrend {
    let first = history.first().map(field).unwrap_or_default();
    let current = history.last().map(field).unwrap_or_default();
    let average = if history.is_empty() {
        0.0
    } else {
        history.iter().map(field).sum::<f64>() / history.len() as f64
    };

    let direction = if current > first { TrendDirection::Increasing } else { flat };
    FeatureTrend { current, average, direction }
}

fn build_prompt(history: &[SensorReading]) -> String {
    let temperature = trend_of(history, |r| r.temperature, TrendDirection::Decreasing);
    let vibration = trend_of(history, |r| r.vibration, TrendDirection::Decreasing);
    let errors = trend_of(history, |r| r.error_count, TrendDirection::Stable);

    format!(
        "Analyze this industrial machine sensor data trend:\n\n\
         Recent Sensor Readings (last {} readings):\n\
         - Temperature: Current {:.1}°C, Average {:.1}°C, Trend: {}\n\
         - Vibration: Current {:.2} mm/s, Average {:.2} mm/s, Trend: {}\n\
         - Error Count: Current {:.0}, Average {:.1}, Trend: {}\n\n\
         Provide:\n\
         1. Brief trend summary (1-2 sentences)\n\
         2. Any anomalies detected (if any)\n\
         3. Key observations\n\n\
         Keep it concise and actionable.",
        history.len(),
        temperature.current,
        temperature.average,
        temperature.direction.as_str(),
        vibration.current,
        vibration.average,
        vibration.direction.as_str(),
        errors.current,
        errors.average,
        errors.direction.as_str(),
    )
}

fn extract_anomalies(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    let mut anomalies = Vec::new();

    if ["anomaly", "unusual", "abnormal"].iter().any(|w| text.contains(w)) {
        anomalies.push("Unusual patterns detected in sensor readings".to_string());
    }
    if text.contains("increasing") && (text.contains("temperature") || text.contains("vibration")) {
        anomalies.push("Rising temperature or vibration detected".to_string());
    }
    if text.contains("error") && (text.contains("high") || text.contains("increasing")) {
        anomalies.push("Elevated error count observed".to_string());
    }

    if anomalies.is_empty() {
        anomalies.push("No significant anomalies detected".to_string());
    }
    anomalies
}

fn fallback(history: &[SensorReading]) -> TrendAnalysis {
    if history.is_empty() {
        return TrendAnalysis {
            summary: "No sensor data available for analysis.".to_string(),
            anomalies: Vec::new(),
            status: TrendStatus::NoData,
            readings: 0,
        };
    }

    let temperature = trend_of(history, |r| r.temperature, TrendDirection::Stable);
    let vibration = trend_of(history, |r| r.vibration, TrendDirection::Stable);

    let summary = format!(
        "Sensor trends show temperature {} and vibration {}. \
         Current readings: Temp {:.1}°C, Vibration {:.2} mm/s.",
        temperature.direction.as_str(),
        vibration.direction.as_str(),
        temperature.current,
        vibration.current,
    );

    let mut anomalies = Vec::new();
    if temperature.current > TREND_TEMPERATURE_ALERT {
        anomalies.push(format!("High temperature detected (>{}°C)", TREND_TEMPERATURE_ALERT));
    }
    if vibration.current > TREND_VIBRATION_ALERT {
        anomalies.push(format!("Elevated vibration detected (>{} mm/s)", TREND_VIBRATION_ALERT));
    }
    if anomalies.is_empty() {
        anomalies.push("No significant anomalies".to_string());
    }

    TrendAnalysis {
        summary,
        anomalies,
        status: TrendStatus::Heuristic,
        readings: history.len(),
    }
}
