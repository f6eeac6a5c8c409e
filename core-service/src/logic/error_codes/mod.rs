//! Error Codes Module
//!
//! Maps a reading and its risk score to one code of a fixed taxonomy.
//!
//! ## Structure
//! - `types`: ErrorCode, Severity, ErrorInfo
//! - `rules`: Thresholds
//! - `catalog`: Static metadata per code
//! - `resolver`: Priority rules

pub mod types;
pub mod rules;
pub mod catalog;
pub mod resolver;

pub use types::{ErrorCode, ErrorInfo, Severity, UnknownErrorCode};
pub use rules::{
    ErrorThresholds,
    CYCLE_TIME_SLOW,
    ERROR_COUNT_HIGH,
    RISK_CRITICAL,
    RISK_HIGH,
    TEMPERATURE_HIGH,
    VIBRATION_HIGH,
};
pub use catalog::ErrorCatalog;
pub use resolver::{determine_error_code, ErrorResolver};
