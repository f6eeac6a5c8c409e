//! Sensor Module
//!
//! Sensor data model and synthetic IoT data for demos.
//!
//! ## Structure
//! - `types`: SensorReading, SensorPayload, ReadingError
//! - `bands`: per-feature baselines and `[min, max]` clamp bands
//! - `generator`: normal / failure reading synthesis
//! - `stream`: rolling history + failure progression for live demos

pub mod types;
pub mod bands;
pub mod generator;
pub mod stream;

pub use types::{
    SensorReading,
    SensorPayload,
    ReadingError,
    FeatureVector,
    FEATURE_COUNT,
    CORE_FEATURES,
    DEFAULT_FEATURES,
};

pub use bands::{Band, SensorBands, NORMAL_BANDS, FAILURE_BANDS};
pub use generator::SensorGenerator;
pub use stream::SensorStream;
