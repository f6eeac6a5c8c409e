//! Synthetic Sensor Generator
//!
//! Plausible IoT readings for demos: a healthy machine oscillating around
//! its baseline, or a machine degrading toward failure as `progress` goes
//! from 0.0 to 1.0. Every value is clamped into its band.

use std::f64::consts::TAU;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Poisson};

use super::bands::{
    SensorBands, BASE_CYCLE_TIME, BASE_ERROR_COUNT, BASE_HUMIDITY, BASE_POWER, BASE_PRESSURE,
    BASE_PRODUCTION_RATE, BASE_TEMPERATURE, BASE_VIBRATION, FAILURE_BANDS, NORMAL_BANDS,
};
use super::types::SensorReading;

/// Readings per oscillation in normal mode
pub const NORMAL_PERIOD: u64 = 100;

/// Readings per oscillation in failure mode
pub const FAILURE_PERIOD: u64 = 80;

/// Degradation curve `progress^1.2` - accelerates toward progress = 1
pub const FAILURE_CURVE_EXPONENT: f64 = 1.2;

/// Amplitude of the periodic term superimposed on failure readings
const FAILURE_OSCILLATION: f64 = 0.3;

pub struct SensorGenerator {
    rng: StdRng,
}

impl SensorGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible noise
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Healthy machine reading
    pub fn normal(&mut self, history_length: u64) -> SensorReading {
        let wave = phase_wave(history_length, NORMAL_PERIOD);
        let bands = &NORMAL_BANDS;

        let temperature = BASE_TEMPERATURE + wave * 4.0 + self.noise(0.8);
        let vibration = BASE_VIBRATION + wave * 0.3 + self.noise(0.15);
        let cycle_time = BASE_CYCLE_TIME + wave * 1.5 + self.noise(0.5);
        let error_count = self.poisson(0.1).floor();
        let pressure = BASE_PRESSURE + wave * 1.5 + self.noise(0.5);
        let humidity = BASE_HUMIDITY + self.noise(1.0);
        let power = BASE_POWER + wave * 100.0 + self.noise(30.0);
        let production = BASE_PRODUCTION_RATE + wave * 1.0 + self.noise(0.3);

        clamp_reading(bands, [
            temperature, vibration, cycle_time, error_count,
            pressure, humidity, power, production,
        ])
    }

    /// Degrading machine reading; `progress` is clamped to `[0, 1]`
    pub fn failure(&mut self, progress: f64, history_length: u64) -> SensorReading {
        let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
        let curve = progress.powf(FAILURE_CURVE_EXPONENT);
        let wave = phase_wave(history_length, FAILURE_PERIOD) * FAILURE_OSCILLATION;
        let bands = &FAILURE_BANDS;

        let temperature = BASE_TEMPERATURE + curve * 40.0 + wave * 2.0 + self.noise(1.5);
        let vibration = BASE_VIBRATION * (1.0 + curve * 4.5) + wave * 0.5 + self.noise(0.5);
        let cycle_time = BASE_CYCLE_TIME + curve * 28.0 + wave * 1.5 + self.noise(1.0);
        let error_count = (BASE_ERROR_COUNT + curve * 18.0 + self.poisson(0.5)).floor();
        let pressure = BASE_PRESSURE + curve * 22.0 + wave * 1.5 + self.noise(1.2);
        let humidity = BASE_HUMIDITY - curve * 3.5 + self.noise(0.8);
        let power = BASE_POWER * (1.0 + curve * 0.20) + wave * 80.0 + self.noise(60.0);
        let production = BASE_PRODUCTION_RATE - curve * 32.0 + wave * 1.5 + self.noise(1.5);

        clamp_reading(bands, [
            temperature, vibration, cycle_time, error_count,
            pressure, humidity, power, production,
        ])
    }

    fn noise(&mut self, std_dev: f64) -> f64 {
        Normal::new(0.0, std_dev)
            .map(|dist| dist.sample(&mut self.rng))
            .unwrap_or(0.0)
    }

    fn poisson(&mut self, lambda: f64) -> f64 {
        Poisson::new(lambda)
            .map(|dist| dist.sample(&mut self.rng))
            .unwrap_or(0.0)
    }
}

impl Default for SensorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// sin over one period, in [-1, 1]
fn phase_wave(history_length: u64, period: u64) -> f64 {
    let position = (history_length % period) as f64 / period as f64;
    (position * TAU).sin()
}

fn clamp_reading(bands: &SensorBands, raw: [f64; 8]) -> SensorReading {
    let [temperature, vibration, cycle_time, error_count, pressure, humidity, power, production] = raw;

    SensorReading {
        timestamp: Some(Utc::now()),
        temperature: bands.temperature.clamp(temperature),
        vibration: bands.vibration.clamp(vibration),
        cycle_time: bands.cycle_time.clamp(cycle_time),
        error_count: bands.error_count.clamp(error_count),
        pressure: Some(bands.pressure.clamp(pressure)),
        humidity: Some(bands.humidity.clamp(humidity)),
        power_consumption: Some(bands.power_consumption.clamp(power)),
        production_rate: Some(bands.production_rate.clamp(production)),
    }
}

// ============================================================================
// TESTS
// ============================================================================
