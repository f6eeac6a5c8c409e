//! Logic Module - Downtime Risk Engine
//!
//! ## Architecture
//! - `sensor/` - Readings, bands, synthetic generator
//! - `model/` - Training data, random forest, predictor
//! - `error_codes/` - Error code taxonomy and resolver
//! - `response/` - Notification gate and webhook delivery
//! - `explain/` - Explanations and trend summaries
//! - `pipeline/` - Wires the above together

pub mod config;
pub mod sensor;
pub mod model;
pub mod error_codes;
pub mod response;
pub mod explain;
pub mod pipeline;
