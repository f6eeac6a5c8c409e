//! Synthetic Training Data
//!
//! Balanced labelled dataset: half "normal" readings, half "risk" readings
//! drawn from distributions with higher centre and spread.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Poisson};

use crate::logic::sensor::FEATURE_COUNT;

/// Label of the normal class
pub const NORMAL_LABEL: u8 = 0;

/// Label of the downtime-risk class
pub const RISK_LABEL: u8 = 1;

// ============================================================================
// CLASS PROFILES
// ============================================================================

/// Sampling distributions of one class
#[derive(Debug, Clone, Copy)]
pub struct ClassProfile {
    /// (mean, std) °C
    pub temperature: (f64, f64),
    /// (mean, std) mm/s
    pub vibration: (f64, f64),
    /// (mean, std) s
    pub cycle_time: (f64, f64),
    /// Poisson rate
    pub error_rate: f64,
}

pub const NORMAL_PROFILE: ClassProfile = ClassProfile {
    temperature: (65.0, 5.0),
    vibration: (2.3, 0.5),
    cycle_time: (42.5, 2.0),
    error_rate: 0.5,
};

pub const RISK_PROFILE: ClassProfile = ClassProfile {
    temperature: (95.0, 10.0),
    vibration: (8.0, 3.0),
    cycle_time: (60.0, 8.0),
    error_rate: 10.0,
};

// ============================================================================
// DATASET
// ============================================================================

/// Feature matrix (rows = samples, columns = `CORE_FEATURES`) plus labels
#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: Array2<f64>,
    pub labels: Array1<u8>,
}

impl Dataset {
    /// `n_samples / 2` normal rows followed by the remaining risk rows
    pub fn synthetic(n_samples: usize, seed: u64) -> Dataset {
        let mut rng = StdRng::seed_from_u64(seed);
        let n_normal = n_samples / 2;

        let mut features = Array2::<f64>::zeros((n_samples, FEATURE_COUNT));
        let mut labels = Array1::<u8>::zeros(n_samples);

        for i in 0..n_samples {
            let (profile, label) = if i < n_normal {
                (&NORMAL_PROFILE, NORMAL_LABEL)
            } else {
                (&RISK_PROFILE, RISK_LABEL)
            };

            let row = sample_profile(profile, &mut rng);
            for (j, value) in row.iter().enumerate() {
                features[[i, j]] = *value;
            }
            labels[i] = label;
        }

        Dataset { features, labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn value(&self, row: usize, feature: usize) -> f64 {
        self.features[[row, feature]]
    }

    pub fn label(&self, row: usize) -> u8 {
        self.labels[row]
    }

    pub fn row(&self, row: usize) -> [f64; FEATURE_COUNT] {
        let mut out = [0.0; FEATURE_COUNT];
        for (j, slot) in out.iter_mut().enumerate() {
            *slot = self.features[[row, j]];
        }
        out
    }

    /// Sub-dataset of the given rows, in that order
    pub fn select(&self, rows: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select(Axis(0), rows),
            labels: self.labels.select(Axis(0), rows),
        }
    }

    /// Shuffled (train, test) split; the test set gets `ceil(len * test_fraction)` rows
    pub fn split(&self, test_fraction: f64, seed: u64) -> (Dataset, Dataset) {
        let mut rows: Vec<usize> = (0..self.len()).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        rows.shuffle(&mut rng);

        let fraction = test_fraction.clamp(0.0, 1.0);
        let n_test = ((self.len() as f64) * fraction).ceil() as usize;
        let (test_rows, train_rows) = rows.split_at(n_test.min(self.len()));

        (self.select(train_rows), self.select(test_rows))
    }

    /// Share of rows labelled as risk
    pub fn risk_share(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let risk = self.labels.iter().filter(|&&l| l == RISK_LABEL).count();
        risk as f64 / self.len() as f64
    }
}

fn sample_profile(profile: &ClassProfile, rng: &mut StdRng) -> [f64; FEATURE_COUNT] {
    let temperature = gaussian(rng, profile.temperature);
    let vibration = gaussian(rng, profile.vibration);
    let cycle_time = gaussian(rng, profile.cycle_time);
    let error_count = Poisson::new(profile.error_rate)
        .map(|d| d.sample(rng))
        .unwrap_or(profile.error_rate);

    [temperature, vibration, cycle_time, error_count]
}

fn gaussian(rng: &mut StdRng, (mean, std): (f64, f64)) -> f64 {
    Normal::new(mean, std).map(|d| d.sample(rng)).unwrap_or(mean)
}
