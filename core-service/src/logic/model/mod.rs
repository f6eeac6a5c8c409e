//! Model Module - Downtime Risk Classifier
//!
//! Synthetic training data, the forest itself, and the predictor that owns
//! the trained instance.

pub mod dataset;
pub mod forest;
pub mod inference;

// Re-export common types
pub use dataset::{Dataset, NORMAL_LABEL, RISK_LABEL};
pub use forest::{ForestParams, RandomForest};
pub use inference::{
    FeatureImportance, RiskAssessment, RiskPredictor, TrainingConfig, TrainingReport, MODEL_TYPE,
};
