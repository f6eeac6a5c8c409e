//! Sensor Baselines & Bands
//!
//! Baseline values of a healthy CNC-class machine and the hard `[min, max]`
//! band every generated value is clamped into.

use serde::Serialize;

use super::types::SensorReading;

// ============================================================================
// BASELINES (healthy machine)
// ============================================================================

/// Spindle temperature (°C)
pub const BASE_TEMPERATURE: f64 = 65.0;
/// ISO 10816 class A vibration (mm/s RMS)
pub const BASE_VIBRATION: f64 = 2.3;
/// Optimised production cycle (s)
pub const BASE_CYCLE_TIME: f64 = 42.5;
/// Errors per reading
pub const BASE_ERROR_COUNT: f64 = 0.3;
/// Hydraulic pressure (bar)
pub const BASE_PRESSURE: f64 = 105.0;
/// Controlled environment (%RH)
pub const BASE_HUMIDITY: f64 = 48.0;
/// 15.25 kW motor (W)
pub const BASE_POWER: f64 = 15250.0;
/// OEE (%)
pub const BASE_PRODUCTION_RATE: f64 = 94.5;

// ============================================================================
// BAND
// ============================================================================

/// Inclusive value range
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp into the band; NaN collapses to `min`
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One band per generated field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorBands {
    pub temperature: Band,
    pub vibration: Band,
    pub cycle_time: Band,
    pub error_count: Band,
    pub pressure: Band,
    pub humidity: Band,
    pub power_consumption: Band,
    pub production_rate: Band,
}

/// Bands for normal operation
pub const NORMAL_BANDS: SensorBands = SensorBands {
    temperature: Band::new(60.0, 72.0),
    vibration: Band::new(1.8, 2.8),
    cycle_time: Band::new(40.0, 45.0),
    error_count: Band::new(0.0, 3.0),
    pressure: Band::new(103.0, 107.0),
    humidity: Band::new(45.0, 51.0),
    power_consumption: Band::new(15100.0, 15400.0),
    production_rate: Band::new(93.0, 96.0),
};

/// Bands for a degrading machine
pub const FAILURE_BANDS: SensorBands = SensorBands {
    temperature: Band::new(65.0, 110.0),
    vibration: Band::new(2.3, 14.0),
    cycle_time: Band::new(42.5, 75.0),
    error_count: Band::new(0.0, 30.0),
    pressure: Band::new(105.0, 130.0),
    humidity: Band::new(42.0, 50.0),
    power_consumption: Band::new(15250.0, 18500.0),
    production_rate: Band::new(60.0, 95.0),
};

impl SensorBands {
    /// True if every present field of `reading` lies inside its band
    pub fn contains(&self, reading: &SensorReading) -> bool {
        let optional_ok = |band: &Band, value: Option<f64>| value.map_or(true, |v| band.contains(v));

        self.temperature.contains(reading.temperature)
            && self.vibration.contains(reading.vibration)
            && self.cycle_time.contains(reading.cycle_time)
            && self.error_count.contains(reading.error_count)
            && optional_ok(&self.pressure, reading.pressure)
            && optional_ok(&self.humidity, reading.humidity)
            && optional_ok(&self.power_consumption, reading.power_consumption)
            && optional_ok(&self.production_rate, reading.production_rate)
    }
}
