//! Error Catalogue
//!
//! Static metadata per code, built once and shared read-only.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::{ErrorCode, ErrorInfo, Severity};

/// (code, description, severity, causes, actions)
type Entry = (ErrorCode, &'static str, Severity, &'static [&'static str], &'static [&'static str]);

const ENTRIES: [Entry; 7] = [
    (
        ErrorCode::Unknown,
        "Unknown/General Error",
        Severity::Medium,
        &["General system issue or multiple contributing factors"],
        &["Monitor closely", "Check system logs", "Schedule general inspection"],
    ),
    (
        ErrorCode::HighTemperature,
        "High Temperature",
        Severity::High,
        &["Motor overheating", "Cooling system failure", "Excessive load"],
        &["Check cooling system", "Reduce load", "Inspect motor bearings"],
    ),
    (
        ErrorCode::HighVibration,
        "High Vibration",
        Severity::High,
        &["Bearing wear", "Misalignment", "Unbalanced rotating parts"],
        &["Inspect bearings", "Check alignment", "Balance rotating components"],
    ),
    (
        ErrorCode::HighErrorCount,
        "High Error Count",
        Severity::High,
        &["Software errors", "Communication issues", "Sensor malfunctions"],
        &["Check system logs", "Restart affected systems", "Verify sensor connections"],
    ),
    (
        ErrorCode::SlowCycleTime,
        "Slow Cycle Time",
        Severity::Medium,
        &["Mechanical wear", "Process inefficiencies", "Component degradation"],
        &["Inspect mechanical components", "Optimize process parameters"],
    ),
    (
        ErrorCode::CriticalRisk,
        "Critical Risk",
        Severity::Critical,
        &["Multiple critical issues detected simultaneously"],
        &["Immediate shutdown required", "Full system inspection", "Emergency maintenance"],
    ),
    (
        ErrorCode::HighRisk,
        "High Risk",
        Severity::High,
        &["Elevated risk requiring preventive action"],
        &["Schedule maintenance", "Monitor closely", "Prepare for potential shutdown"],
    ),
];

static STANDARD: Lazy<ErrorCatalog> = Lazy::new(ErrorCatalog::build);

#[derive(Debug, Clone)]
pub struct ErrorCatalog {
    entries: HashMap<ErrorCode, ErrorInfo>,
}

impl ErrorCatalog {
    /// Process-wide catalogue
    pub fn standard() -> &'static ErrorCatalog {
        &STANDARD
    }

    fn build() -> ErrorCatalog {
        let entries = ENTRIES
            .iter()
            .map(|(code, description, severity, causes, actions)| {
                let info = ErrorInfo {
                    code: code.as_str().to_string(),
                    description: description.to_string(),
                    severity: *severity,
                    causes: causes.iter().map(|c| c.to_string()).collect(),
                    recommended_actions: actions.iter().map(|a| a.to_string()).collect(),
                };
                (*code, info)
            })
            .collect();
        ErrorCatalog { entries }
    }

    pub fn info(&self, code: ErrorCode) -> ErrorInfo {
        self.entries
            .get(&code)
            .cloned()
            .unwrap_or_else(|| placeholder(code.as_str()))
    }

    /// Lookup by string; anything unrecognised gets the placeholder
    pub fn lookup(&self, code: &str) -> ErrorInfo {
        match code.parse::<ErrorCode>() {
            Ok(parsed) => self.info(parsed),
            Err(_) => placeholder(code),
        }
    }

    /// Every code, E000 first
    pub fn all(&self) -> Vec<ErrorInfo> {
        ErrorCode::ALL.iter().map(|&code| self.info(code)).collect()
    }
}

fn placeholder(code: &str) -> ErrorInfo {
    ErrorInfo {
        code: code.to_string(),
        description: "Unknown error code".to_string(),
        severity: Severity::Unknown,
        causes: vec!["Unknown cause".to_string()],
        recommended_actions: vec!["Contact support".to_string()],
    }
}
