//! Live Sensor Stream
//!
//! Drives the generator tick by tick for the live demo: keeps a rolling
//! window of recent readings and advances failure progress while failure
//! mode is switched on.

use std::collections::VecDeque;

use super::generator::SensorGenerator;
use super::types::SensorReading;

/// Readings kept for charts and trend analysis
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Progress added per tick in failure mode
pub const FAILURE_PROGRESS_STEP: f64 = 0.012;

pub struct SensorStream {
    generator: SensorGenerator,
    history: VecDeque<SensorReading>,
    capacity: usize,
    failure_mode: bool,
    progress: f64,
    ticks: u64,
}

impl SensorStream {
    pub fn new(generator: SensorGenerator) -> Self {
        Self::with_capacity(generator, DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_capacity(generator: SensorGenerator, capacity: usize) -> Self {
        Self {
            generator,
            history: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            failure_mode: false,
            progress: 0.0,
            ticks: 0,
        }
    }

    /// Switching failure mode off resets progress
    pub fn set_failure_mode(&mut self, enabled: bool) {
        self.failure_mode = enabled;
        if !enabled {
            self.progress = 0.0;
        }
    }

    pub fn failure_mode(&self) -> bool {
        self.failure_mode
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Produce the next reading and push it into the history window
    pub fn tick(&mut self) -> SensorReading {
        let reading = if self.failure_mode {
            self.progress = (self.progress + FAILURE_PROGRESS_STEP).min(1.0);
            self.generator.failure(self.progress, self.ticks)
        } else {
            self.generator.normal(self.ticks)
        };

        self.ticks += 1;
        self.history.push_back(reading.clone());
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }

        reading
    }

    /// Oldest first
    pub fn history(&self) -> Vec<SensorReading> {
        self.history.iter().cloned().collect()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_bounded() {
        let mut stream = SensorStream::with_capacity(SensorGenerator::with_seed(1), 5);
        for _ in 0..12 {
            stream.tick();
        }
        assert_eq!(stream.history().len(), 5);
        assert_eq!(stream.ticks(), 12);
    }

    #[test]
    fn test_failure_progress_advances_and_resets() {
        let mut stream = SensorStream::new(SensorGenerator::with_seed(2));
        assert!(!stream.failure_mode());
        stream.set_failure_mode(true);
        assert!(stream.failure_mode());
        for _ in 0..10 {
            stream.tick();
        }
        assert!((stream.progress() - 0.12).abs() < 1e-9);

        stream.set_failure_mode(false);
        assert!(!stream.failure_mode());
        assert_eq!(stream.progress(), 0.0);
    }

    #[test]
    fn test_progress_saturates_at_one() {
        let mut stream = SensorStream::new(SensorGenerator::with_seed(4));
        stream.set_failure_mode(true);
        for _ in 0..200 {
            stream.tick();
        }
        assert_eq!(stream.progress(), 1.0);
    }
}
