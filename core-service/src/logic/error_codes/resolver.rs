//! Error Code Resolver
//!
//! Input: SensorReading + risk score
//! Output: exactly one ErrorCode, first matching rule wins:
//!
//! 1. temperature > temperature_high
//! 2. vibration > vibration_high
//! 3. error_count > error_count_high
//! 4. cycle_time > cycle_time_slow
//! 5. risk >= risk_critical
//! 6. risk >= risk_high
//! 7. otherwise Unknown

use super::catalog::ErrorCatalog;
use super::rules::ErrorThresholds;
use super::types::{ErrorCode, ErrorInfo};
use crate::logic::sensor::SensorReading;

/// Pure rule table; sensor checks take precedence over the risk tiers
pub fn determine_error_code(
    reading: &SensorReading,
    risk_score: u8,
    thresholds: &ErrorThresholds,
) -> ErrorCode {
    if reading.temperature > thresholds.temperature_high {
        ErrorCode::HighTemperature
    } else if reading.vibration > thresholds.vibration_high {
        ErrorCode::HighVibration
    } else if reading.error_count > thresholds.error_count_high {
        ErrorCode::HighErrorCount
    } else if reading.cycle_time > thresholds.cycle_time_slow {
        ErrorCode::SlowCycleTime
    } else if risk_score >= thresholds.risk_critical {
        ErrorCode::CriticalRisk
    } else if risk_score >= thresholds.risk_high {
        ErrorCode::HighRisk
    } else {
        ErrorCode::Unknown
    }
}

/// Thresholds plus the catalogue they resolve into
#[derive(Debug, Clone)]
pub struct ErrorResolver {
    thresholds: ErrorThresholds,
    catalog: &'static ErrorCatalog,
}

impl Default for ErrorResolver {
    fn default() -> Self {
        Self::new(ErrorThresholds::default())
    }
}

impl ErrorResolver {
    pub fn new(thresholds: ErrorThresholds) -> Self {
        Self {
            thresholds,
            catalog: ErrorCatalog::standard(),
        }
    }

    pub fn thresholds(&self) -> &ErrorThresholds {
        &self.thresholds
    }

    pub fn catalog(&self) -> &ErrorCatalog {
        self.catalog
    }

    pub fn determine(&self, reading: &SensorReading, risk_score: u8) -> ErrorCode {
        determine_error_code(reading, risk_score, &self.thresholds)
    }

    /// Code plus its metadata
    pub fn resolve(&self, reading: &SensorReading, risk_score: u8) -> ErrorInfo {
        self.catalog.info(self.determine(reading, risk_score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(temperature: f64, vibration: f64, cycle_time: f64, error_count: f64) -> SensorReading {
        SensorReading::new(temperature, vibration, cycle_time, error_count)
    }

    fn code(r: &SensorReading, risk: u8) -> ErrorCode {
        determine_error_code(r, risk, &ErrorThresholds::default())
    }

    #[test]
    fn test_temperature_boundary_is_strict() {
        assert_eq!(code(&reading(90.0, 2.0, 40.0, 1.0), 0), ErrorCode::Unknown);
        assert_eq!(code(&reading(90.01, 2.0, 40.0, 1.0), 0), ErrorCode::HighTemperature);
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(code(&reading(95.0, 11.0, 40.0, 1.0), 95), ErrorCode::HighTemperature);
        assert_eq!(code(&reading(70.0, 11.0, 80.0, 20.0), 95), ErrorCode::HighVibration);
        assert_eq!(code(&reading(70.0, 3.0, 80.0, 20.0), 95), ErrorCode::HighErrorCount);
        assert_eq!(code(&reading(70.0, 3.0, 80.0, 2.0), 95), ErrorCode::SlowCycleTime);
    }

    #[test]
    fn test_risk_tiers_are_inclusive() {
        let calm = reading(70.0, 3.0, 45.0, 2.0);
        assert_eq!(code(&calm, 90), ErrorCode::CriticalRisk);
        assert_eq!(code(&calm, 89), ErrorCode::HighRisk);
        assert_eq!(code(&calm, 75), ErrorCode::HighRisk);
        assert_eq!(code(&calm, 74), ErrorCode::Unknown);
    }

    #[test]
    fn test_other_limits_are_strict() {
        assert_eq!(code(&reading(70.0, 10.0, 70.0, 15.0), 0), ErrorCode::Unknown);
    }

    #[test]
    fn test_custom_thresholds() {
        let resolver = ErrorResolver::new(ErrorThresholds {
            temperature_high: 80.0,
            ..Default::default()
        });
        assert_eq!(resolver.determine(&reading(85.0, 2.0, 40.0, 1.0), 0), ErrorCode::HighTemperature);

        let lenient = ErrorResolver::new(ErrorThresholds::default().with_risk_high(60));
        assert_eq!(lenient.determine(&reading(70.0, 2.0, 40.0, 1.0), 65), ErrorCode::HighRisk);
    }

    #[test]
    fn test_resolve_attaches_metadata() {
        let info = ErrorResolver::default().resolve(&reading(85.5, 8.2, 65.3, 12.0), 85);
        assert_eq!(info.code, "E006");
        assert_eq!(info.description, "High Risk");
    }
}
