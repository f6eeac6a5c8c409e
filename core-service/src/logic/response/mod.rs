//! Response Module - Alerting
//!
//! # Components
//! - `types.rs`: AlertPayload, AlertDecision, DeliveryOutcome
//! - `gate.rs`: Threshold policy and payload assembly
//! - `webhook.rs`: HTTP delivery to a workflow endpoint

pub mod types;
pub mod gate;
pub mod webhook;

pub use types::{
    AlertDecision, AlertPayload, DeliveryOutcome, WorkflowResponse, ALERT_TYPE,
    DEFAULT_EXPLANATION,
};
pub use gate::NotificationGate;
pub use webhook::{AlertTransport, WebhookTransport};
