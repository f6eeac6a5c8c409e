//! Sensor Types
//!
//! Core data types for machine sensor readings.
//! No logic beyond validation - only data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE LAYOUT
// ============================================================================

/// Number of features the risk classifier consumes
pub const FEATURE_COUNT: usize = 4;

/// Classifier feature order
pub const CORE_FEATURES: [&str; FEATURE_COUNT] =
    ["temperature", "vibration", "cycle_time", "error_count"];

/// Fallback values (normal-class baseline) for features missing at predict time
pub const DEFAULT_FEATURES: FeatureVector = [65.0, 2.3, 42.5, 0.0];

/// Core features in `CORE_FEATURES` order
pub type FeatureVector = [f64; FEATURE_COUNT];

// ============================================================================
// SENSOR READING
// ============================================================================

/// One validated machine reading.
///
/// The four core fields are always present. `error_count` is a count but
/// travels as a float, since callers may send fractional values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    /// Degrees Celsius
    pub temperature: f64,
    /// mm/s RMS
    pub vibration: f64,
    /// Seconds
    pub cycle_time: f64,
    pub error_count: f64,

    /// Hydraulic pressure (bar)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Relative humidity (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    /// Watts
    #[serde(default, alias = "power", skip_serializing_if = "Option::is_none")]
    pub power_consumption: Option<f64>,
    /// Production efficiency (%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_rate: Option<f64>,
}

impl SensorReading {
    pub fn new(temperature: f64, vibration: f64, cycle_time: f64, error_count: f64) -> Self {
        Self {
            timestamp: None,
            temperature,
            vibration,
            cycle_time,
            error_count,
            pressure: None,
            humidity: None,
            power_consumption: None,
            production_rate: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Classifier input, in `CORE_FEATURES` order
    pub fn features(&self) -> FeatureVector {
        [self.temperature, self.vibration, self.cycle_time, self.error_count]
    }
}

// ============================================================================
// INBOUND PAYLOAD
// ============================================================================

/// Reading as received from a caller - every field optional so that all
/// missing core fields can be reported at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub vibration: Option<f64>,
    #[serde(default)]
    pub cycle_time: Option<f64>,
    #[serde(default)]
    pub error_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, alias = "power", skip_serializing_if = "Option::is_none")]
    pub power_consumption: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_rate: Option<f64>,
}

impl SensorPayload {
    /// Core fields absent from the payload, in `CORE_FEATURES` order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.core_values()
            .iter()
            .zip(CORE_FEATURES.iter())
            .filter(|(value, _)| value.is_none())
            .map(|(_, name)| *name)
            .collect()
    }

    /// Core features with absent ones replaced by `DEFAULT_FEATURES`.
    ///
    /// Only for scoring convenience; the API boundary goes through
    /// `into_reading` and rejects incomplete payloads.
    pub fn features_or_default(&self) -> FeatureVector {
        let mut features = DEFAULT_FEATURES;
        for (slot, value) in features.iter_mut().zip(self.core_values()) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        features
    }

    /// Validate and convert into a `SensorReading`
    pub fn into_reading(self) -> Result<SensorReading, ReadingError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ReadingError::MissingFields(
                missing.into_iter().map(String::from).collect(),
            ));
        }

        for (name, value) in CORE_FEATURES.iter().zip(self.core_values()) {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(ReadingError::InvalidValue {
                        field: name.to_string(),
                        reason: "must be a finite number".to_string(),
                    });
                }
            }
        }

        let error_count = self.error_count.unwrap_or_default();
        if error_count < 0.0 {
            return Err(ReadingError::InvalidValue {
                field: "error_count".to_string(),
                reason: "must not be negative".to_string(),
            });
        }

        Ok(SensorReading {
            timestamp: self.timestamp,
            temperature: self.temperature.unwrap_or_default(),
            vibration: self.vibration.unwrap_or_default(),
            cycle_time: self.cycle_time.unwrap_or_default(),
            error_count,
            pressure: self.pressure,
            humidity: self.humidity,
            power_consumption: self.power_consumption,
            production_rate: self.production_rate,
        })
    }

    fn core_values(&self) -> [Option<f64>; FEATURE_COUNT] {
        [self.temperature, self.vibration, self.cycle_time, self.error_count]
    }
}

impl From<SensorReading> for SensorPayload {
    fn from(reading: SensorReading) -> Self {
        Self {
            timestamp: reading.timestamp,
            temperature: Some(reading.temperature),
            vibration: Some(reading.vibration),
            cycle_time: Some(reading.cycle_time),
            error_count: Some(reading.error_count),
            pressure: reading.pressure,
            humidity: reading.humidity,
            power_consumption: reading.power_consumption,
            production_rate: reading.production_rate,
        }
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ReadingError {
    /// Required core fields were not supplied
    MissingFields(Vec<String>),
    /// A field was supplied with an unusable value
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ReadingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingError::MissingFields(fields) => {
                write!(f, "Missing required field(s): {}", fields.join(", "))
            }
            ReadingError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for {}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ReadingError {}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_all_reported() {
        let payload = SensorPayload {
            temperature: Some(70.0),
            cycle_time: Some(44.0),
            ..Default::default()
        };

        let err = payload.into_reading().unwrap_err();
        assert_eq!(
            err,
            ReadingError::MissingFields(vec!["vibration".to_string(), "error_count".to_string()])
        );
        assert!(err.to_string().contains("vibration, error_count"));
    }

    #[test]
    fn test_complete_payload_converts() {
        let payload: SensorPayload = serde_json::from_str(
            r#"{"temperature": 85.5, "vibration": 8.2, "cycle_time": 65.3, "error_count": 12, "power": 15300}"#,
        ).unwrap();

        let reading = payload.into_reading().unwrap();
        assert_eq!(reading.features(), [85.5, 8.2, 65.3, 12.0]);
        assert_eq!(reading.power_consumption, Some(15300.0));
    }

    #[test]
    fn test_negative_error_count_rejected() {
        let payload = SensorPayload::from(SensorReading::new(70.0, 2.0, 42.0, -1.0));
        let err = payload.into_reading().unwrap_err();
        assert!(matches!(err, ReadingError::InvalidValue { ref field, .. } if field == "error_count"));
    }

    #[test]
    fn test_defaults_fill_only_missing_features() {
        let payload = SensorPayload {
            temperature: Some(99.0),
            ..Default::default()
        };
        assert_eq!(payload.features_or_default(), [99.0, 2.3, 42.5, 0.0]);
    }

    #[test]
    fn test_reading_skips_absent_optional_fields() {
        let json = serde_json::to_value(SensorReading::new(65.0, 2.3, 42.5, 0.0)).unwrap();
        assert!(json.get("pressure").is_none());
        assert!(json.get("timestamp").is_none());
        assert_eq!(json["temperature"], 65.0);
    }
}
