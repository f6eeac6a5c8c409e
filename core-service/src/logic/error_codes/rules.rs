//! Error Code Thresholds
//!
//! Named limits used by the resolver. No resolution logic here.

use serde::{Deserialize, Serialize};

// ============================================================================
// THRESHOLDS
// ============================================================================

/// °C, strictly above
pub const TEMPERATURE_HIGH: f64 = 90.0;

/// mm/s, strictly above
pub const VIBRATION_HIGH: f64 = 10.0;

/// Errors per reading, strictly above
pub const ERROR_COUNT_HIGH: f64 = 15.0;

/// Seconds, strictly above
pub const CYCLE_TIME_SLOW: f64 = 70.0;

/// Risk percentage, at or above
pub const RISK_CRITICAL: u8 = 90;

/// Risk percentage, at or above. Also the alert gate threshold.
pub const RISK_HIGH: u8 = 75;

// ============================================================================
// CONFIGURABLE THRESHOLDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorThresholds {
    pub temperature_high: f64,
    pub vibration_high: f64,
    pub error_count_high: f64,
    pub cycle_time_slow: f64,
    pub risk_critical: u8,
    pub risk_high: u8,
}

impl Default for ErrorThresholds {
    fn default() -> Self {
        Self {
            temperature_high: TEMPERATURE_HIGH,
            vibration_high: VIBRATION_HIGH,
            error_count_high: ERROR_COUNT_HIGH,
            cycle_time_slow: CYCLE_TIME_SLOW,
            risk_critical: RISK_CRITICAL,
            risk_high: RISK_HIGH,
        }
    }
}

impl ErrorThresholds {
    /// Override the high-risk (and alert) threshold.
    ///
    /// `risk_critical` is raised with it so a critical score always opens the gate.
    pub fn with_risk_high(mut self, risk_high: u8) -> Self {
        self.risk_high = risk_high.min(100);
        self.risk_critical = self.risk_critical.max(self.risk_high);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_alert_threshold_keeps_critical() {
        let thresholds = ErrorThresholds::default().with_risk_high(60);
        assert_eq!(thresholds.risk_high, 60);
        assert_eq!(thresholds.risk_critical, RISK_CRITICAL);
    }

    #[test]
    fn test_alert_threshold_above_critical_lifts_critical() {
        let thresholds = ErrorThresholds::default().with_risk_high(95);
        assert_eq!(thresholds.risk_high, 95);
        assert_eq!(thresholds.risk_critical, 95);

        let capped = ErrorThresholds::default().with_risk_high(250);
        assert_eq!(capped.risk_high, 100);
        assert_eq!(capped.risk_critical, 100);
    }
}
