//! Risk Predictor - Trained Forest Lifecycle
//!
//! Owns the classifier behind a lock with two states: Untrained and Trained.
//! Training publishes a fully built model in one swap; predictions on an
//! untrained instance train it first.

use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::forest::{ForestParams, RandomForest};
use crate::logic::sensor::{FeatureVector, SensorPayload, SensorReading, CORE_FEATURES};

pub const MODEL_TYPE: &str = "RandomForestClassifier";

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Synthetic training setup
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub n_samples: usize,
    pub seed: u64,
    pub test_fraction: f64,
    pub forest: ForestParams,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            seed: 42,
            test_fraction: 0.2,
            forest: ForestParams::default(),
        }
    }
}

/// Result of the last training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    pub model_type: String,
    pub accuracy: f64,
    pub train_samples: usize,
    pub test_samples: usize,
    pub n_estimators: usize,
    pub trained_at: DateTime<Utc>,
}

/// Global importances of the four core features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub temperature: f64,
    pub vibration: f64,
    pub cycle_time: f64,
    pub error_count: f64,
}

impl FeatureImportance {
    fn from_array(values: [f64; 4]) -> Self {
        Self {
            temperature: values[0],
            vibration: values[1],
            cycle_time: values[2],
            error_count: values[3],
        }
    }

    pub fn as_array(&self) -> [f64; 4] {
        [self.temperature, self.vibration, self.cycle_time, self.error_count]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// (feature name, weight), highest weight first
    pub fn ranked(&self) -> Vec<(&'static str, f64)> {
        let mut ranked: Vec<(&'static str, f64)> = CORE_FEATURES
            .iter()
            .copied()
            .zip(self.as_array())
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

/// Score for one reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 0 - 100
    pub risk: u8,
    pub feature_importance: FeatureImportance,
}

struct TrainedModel {
    forest: RandomForest,
    importance: FeatureImportance,
    report: TrainingReport,
}

enum ModelState {
    Untrained,
    Trained(TrainedModel),
}

// ============================================================================
// PREDICTOR
// ============================================================================

pub struct RiskPredictor {
    config: TrainingConfig,
    state: RwLock<ModelState>,
}

impl Default for RiskPredictor {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskPredictor {
    pub fn new() -> Self {
        Self::with_config(TrainingConfig::default())
    }

    pub fn with_config(config: TrainingConfig) -> Self {
        Self {
            config,
            state: RwLock::new(ModelState::Untrained),
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(*self.state.read(), ModelState::Trained(_))
    }

    /// Fit a fresh forest and replace the current model
    pub fn train(&self) -> TrainingReport {
        let model = fit(&self.config);
        let report = model.report.clone();
        *self.state.write() = ModelState::Trained(model);
        report
    }

    /// Train once; later calls are no-ops
    pub fn ensure_trained(&self) {
        let state = self.state.upgradable_read();
        if matches!(*state, ModelState::Trained(_)) {
            return;
        }
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        *state = ModelState::Trained(fit(&self.config));
    }

    pub fn training_report(&self) -> Option<TrainingReport> {
        match &*self.state.read() {
            ModelState::Trained(model) => Some(model.report.clone()),
            ModelState::Untrained => None,
        }
    }

    pub fn predict_risk(&self, reading: &SensorReading) -> RiskAssessment {
        self.predict_features(&reading.features())
    }

    /// Missing core fields fall back to the normal baseline
    pub fn predict_payload(&self, payload: &SensorPayload) -> RiskAssessment {
        self.predict_features(&payload.features_or_default())
    }

    pub fn predict_features(&self, features: &FeatureVector) -> RiskAssessment {
        loop {
            if let ModelState::Trained(model) = &*self.state.read() {
                let probability = model.forest.predict_proba(features);
                return RiskAssessment {
                    risk: to_percent(probability),
                    feature_importance: model.importance,
                };
            }
            self.ensure_trained();
        }
    }
}

fn to_percent(probability: f64) -> u8 {
    (probability * 100.0).floor().clamp(0.0, 100.0) as u8
}

fn fit(config: &TrainingConfig) -> TrainedModel {
    log::info!(
        "Training {} on {} synthetic samples (seed {})",
        MODEL_TYPE,
        config.n_samples,
        config.seed
    );

    let data = Dataset::synthetic(config.n_samples, config.seed);
    let (train, test) = data.split(config.test_fraction, config.seed);
    let forest = RandomForest::fit(&train, &config.forest);
    let accuracy = forest.score(&test);

    log::info!("Model trained: accuracy {:.3} on {} held-out samples", accuracy, test.len());

    let importance = FeatureImportance::from_array(forest.feature_importances());
    let report = TrainingReport {
        model_type: MODEL_TYPE.to_string(),
        accuracy,
        train_samples: train.len(),
        test_samples: test.len(),
        n_estimators: forest.n_trees(),
        trained_at: Utc::now(),
    };

    TrainedModel { forest, importance, report }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> TrainingConfig {
        TrainingConfig {
            n_samples: 400,
            forest: ForestParams {
                n_estimators: 20,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_to_percent_truncates() {
        assert_eq!(to_percent(0.859), 85);
        assert_eq!(to_percent(1.0), 100);
        assert_eq!(to_percent(0.0), 0);
    }

    #[test]
    fn test_predict_trains_lazily() {
        let predictor = RiskPredictor::with_config(quick_config());
        assert!(!predictor.is_trained());
        assert!(predictor.training_report().is_none());

        let result = predictor.predict_risk(&SensorReading::new(65.0, 2.3, 42.5, 0.0));
        assert!(predictor.is_trained());
        assert!(result.risk <= 100);
    }

    #[test]
    fn test_train_reports_accuracy() {
        let predictor = RiskPredictor::with_config(quick_config());
        let report = predictor.train();

        assert_eq!(report.model_type, MODEL_TYPE);
        assert_eq!(report.test_samples, 80);
        assert_eq!(report.train_samples, 320);
        assert_eq!(report.n_estimators, 20);
        assert!(report.accuracy >= 0.9, "accuracy {}", report.accuracy);
    }

    #[test]
    fn test_extremes_are_separated() {
        let predictor = RiskPredictor::with_config(quick_config());
        predictor.train();

        let calm = predictor.predict_risk(&SensorReading::new(65.0, 2.3, 42.5, 0.0));
        let failing = predictor.predict_risk(&SensorReading::new(110.0, 14.0, 75.0, 20.0));

        assert!(calm.risk <= 25, "calm risk {}", calm.risk);
        assert!(failing.risk >= 75, "failing risk {}", failing.risk);
    }

    #[test]
    fn test_importance_is_global_and_normalised() {
        let predictor = RiskPredictor::with_config(quick_config());
        let a = predictor.predict_risk(&SensorReading::new(65.0, 2.3, 42.5, 0.0));
        let b = predictor.predict_risk(&SensorReading::new(100.0, 9.0, 70.0, 12.0));

        assert_eq!(a.feature_importance, b.feature_importance);
        assert!((a.feature_importance.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_retraining_is_reproducible() {
        let predictor = RiskPredictor::with_config(quick_config());
        let reading = SensorReading::new(80.0, 5.0, 55.0, 4.0);

        predictor.train();
        let first = predictor.predict_risk(&reading);
        predictor.train();
        let second = predictor.predict_risk(&reading);

        assert_eq!(first.risk, second.risk);
    }

    #[test]
    fn test_payload_defaults_missing_fields() {
        let predictor = RiskPredictor::with_config(quick_config());
        let payload = SensorPayload {
            temperature: Some(65.0),
            ..Default::default()
        };
        let from_payload = predictor.predict_payload(&payload);
        let baseline = predictor.predict_risk(&SensorReading::new(65.0, 2.3, 42.5, 0.0));
        assert_eq!(from_payload.risk, baseline.risk);
    }

    #[test]
    fn test_ranked_orders_by_weight() {
        let importance = FeatureImportance::from_array([0.1, 0.4, 0.2, 0.3]);
        let ranked = importance.ranked();
        assert_eq!(ranked[0].0, "vibration");
        assert_eq!(ranked[3].0, "temperature");
    }
}
