//! Error Code Types
//!
//! The fixed code set and its metadata records.
//! No resolution logic here.

use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR CODE
// ============================================================================

/// Discrete classification of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "E000")]
    Unknown,
    #[serde(rename = "E001")]
    HighTemperature,
    #[serde(rename = "E002")]
    HighVibration,
    #[serde(rename = "E003")]
    HighErrorCount,
    #[serde(rename = "E004")]
    SlowCycleTime,
    #[serde(rename = "E005")]
    CriticalRisk,
    #[serde(rename = "E006")]
    HighRisk,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 7] = [
        ErrorCode::Unknown,
        ErrorCode::HighTemperature,
        ErrorCode::HighVibration,
        ErrorCode::HighErrorCount,
        ErrorCode::SlowCycleTime,
        ErrorCode::CriticalRisk,
        ErrorCode::HighRisk,
    ];

    /// Wire form, "E000" .. "E006"
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "E000",
            ErrorCode::HighTemperature => "E001",
            ErrorCode::HighVibration => "E002",
            ErrorCode::HighErrorCount => "E003",
            ErrorCode::SlowCycleTime => "E004",
            ErrorCode::CriticalRisk => "E005",
            ErrorCode::HighRisk => "E006",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "UNKNOWN",
            ErrorCode::HighTemperature => "HIGH_TEMPERATURE",
            ErrorCode::HighVibration => "HIGH_VIBRATION",
            ErrorCode::HighErrorCount => "HIGH_ERROR_COUNT",
            ErrorCode::SlowCycleTime => "SLOW_CYCLE_TIME",
            ErrorCode::CriticalRisk => "CRITICAL_RISK",
            ErrorCode::HighRisk => "HIGH_RISK",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    /// Accepts the wire form ("E001") or the name ("HIGH_TEMPERATURE"), any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == wanted || code.name() == wanted)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownErrorCode(pub String);

impl std::fmt::Display for UnknownErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown error code: {}", self.0)
    }
}

impl std::error::Error for UnknownErrorCode {}

// ============================================================================
// SEVERITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Medium,
    High,
    Critical,
    /// Placeholder for codes outside the catalogue
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// Everything known about one code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Wire string; unrecognised lookups keep the caller's string
    pub code: String,
    pub description: String,
    pub severity: Severity,
    pub causes: Vec<String>,
    pub recommended_actions: Vec<String>,
}
