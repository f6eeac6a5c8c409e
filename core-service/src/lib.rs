//! Factory Copilot - Downtime Risk Engine
//!
//! Scores machine sensor readings for downtime risk, maps them to an error
//! code, and gates alerts to a workflow webhook.

pub mod constants;
pub mod logic;

pub use logic::config::CopilotConfig;
pub use logic::error_codes::{ErrorCatalog, ErrorCode, ErrorInfo, ErrorResolver, ErrorThresholds};
pub use logic::model::{RiskAssessment, RiskPredictor};
pub use logic::pipeline::{Assessment, Copilot, ProcessedReading};
pub use logic::response::{AlertDecision, AlertPayload, DeliveryOutcome, NotificationGate};
pub use logic::sensor::{SensorGenerator, SensorPayload, SensorReading, SensorStream};
