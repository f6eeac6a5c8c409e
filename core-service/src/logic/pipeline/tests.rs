use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use super::Copilot;
use crate::logic::config::CopilotConfig;
use crate::logic::error_codes::ErrorCode;
use crate::logic::model::{ForestParams, TrainingConfig};
use crate::logic::response::{AlertPayload, AlertTransport, DeliveryOutcome, WorkflowResponse};
use crate::logic::sensor::{SensorGenerator, SensorReading, FAILURE_BANDS};

/// Records payloads and answers with a fixed outcome
struct RecordingTransport {
    outcome: DeliveryOutcome,
    seen: Arc<Mutex<Vec<AlertPayload>>>,
    calls: Arc<AtomicUsize>,
}

impl RecordingTransport {
    fn new(outcome: DeliveryOutcome) -> (Self, Arc<Mutex<Vec<AlertPayload>>>, Arc<AtomicUsize>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self { outcome, seen: seen.clone(), calls: calls.clone() },
            seen,
            calls,
        )
    }
}

impl AlertTransport for RecordingTransport {
    fn name(&self) -> &str {
        "recording"
    }

    fn deliver(&self, payload: &AlertPayload) -> DeliveryOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(payload.clone());
        self.outcome.clone()
    }

    fn check(&self) -> DeliveryOutcome {
        self.outcome.clone()
    }
}

fn quick_copilot() -> Copilot {
    let config = CopilotConfig {
        training: TrainingConfig {
            n_samples: 400,
            forest: ForestParams { n_estimators: 20, ..Default::default() },
            ..Default::default()
        },
        ..Default::default()
    };
    Copilot::from_config(&config)
}

fn delivered() -> DeliveryOutcome {
    DeliveryOutcome::Delivered {
        status_code: 200,
        body: "{}".to_string(),
        response: WorkflowResponse::default(),
    }
}

#[test]
fn test_high_risk_scenario_resolves_e006() {
    let copilot = quick_copilot();
    let reading = SensorReading::new(85.5, 8.2, 65.3, 12.0);

    let decision = copilot.gate().evaluate(&reading, 85, None);
    assert!(decision.triggered);
    let payload = decision.payload.unwrap();
    assert_eq!(payload.error_code, ErrorCode::HighRisk);
    assert_eq!(serde_json::to_value(&payload).unwrap()["error_code"], "E006");
}

#[test]
fn test_temperature_overrides_any_risk() {
    let copilot = quick_copilot();
    let reading = SensorReading::new(95.0, 2.0, 40.0, 1.0);

    for risk in [0u8, 50, 74, 75, 89, 90, 100] {
        assert_eq!(copilot.resolver().determine(&reading, risk), ErrorCode::HighTemperature);
    }
}

#[test]
fn test_calm_reading_stays_quiet() {
    let (transport, _, calls) = RecordingTransport::new(delivered());
    let copilot = quick_copilot().with_transport(Box::new(transport));

    let processed = copilot.process(&SensorReading::new(65.0, 2.3, 42.5, 0.0));
    assert!(processed.assessment.risk < 75);
    assert!(!processed.assessment.alert.triggered);
    assert!(processed.delivery.is_none());
    assert!(processed.explanation.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_failing_reading_is_delivered_with_explanation() {
    let (transport, seen, calls) = RecordingTransport::new(delivered());
    let copilot = quick_copilot().with_transport(Box::new(transport));

    let reading = SensorReading::new(110.0, 14.0, 75.0, 20.0);
    let processed = copilot.process(&reading);

    assert!(processed.assessment.risk >= 75);
    assert!(processed.assessment.alert.triggered);
    assert_eq!(processed.assessment.error.code, "E001");
    assert_eq!(processed.delivery, Some(delivered()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let explanation = processed.explanation.unwrap();
    let sent = seen.lock().unwrap();
    assert_eq!(sent[0].error_code, ErrorCode::HighTemperature);
    assert_eq!(sent[0].explanation["root_cause"], json!(explanation.root_cause));
}

#[test]
fn test_delivery_failure_keeps_assessment() {
    let reading = SensorReading::new(110.0, 14.0, 75.0, 20.0);

    let (ok_transport, _, _) = RecordingTransport::new(delivered());
    let ok = quick_copilot().with_transport(Box::new(ok_transport)).process(&reading);

    for failure in [
        DeliveryOutcome::TimedOut { timeout_secs: 30 },
        DeliveryOutcome::Rejected { status_code: 500, body: "boom".to_string() },
        DeliveryOutcome::TransportError { message: "connection refused".to_string() },
    ] {
        let (transport, _, _) = RecordingTransport::new(failure.clone());
        let failed = quick_copilot().with_transport(Box::new(transport)).process(&reading);

        assert_eq!(failed.delivery, Some(failure));
        assert_eq!(failed.assessment.risk, ok.assessment.risk);
        assert_eq!(failed.assessment.error, ok.assessment.error);
        assert!(failed.assessment.alert.triggered);
    }
}

#[test]
fn test_missing_transport_reports_not_configured() {
    let processed = quick_copilot().process(&SensorReading::new(110.0, 14.0, 75.0, 20.0));
    assert_eq!(processed.delivery, Some(DeliveryOutcome::NotConfigured));
    assert!(processed.assessment.alert.triggered);
}

#[test]
fn test_supplied_explanation_is_passed_through() {
    let (transport, seen, _) = RecordingTransport::new(delivered());
    let copilot = quick_copilot().with_transport(Box::new(transport));

    let processed = copilot.process_with_explanation(
        &SensorReading::new(110.0, 14.0, 75.0, 20.0),
        Some(json!("Operator notes: grinding noise")),
    );

    assert!(processed.explanation.is_none());
    assert_eq!(seen.lock().unwrap()[0].explanation, json!("Operator notes: grinding noise"));
}

#[test]
fn test_generated_failure_readings_stay_in_band() {
    let copilot = quick_copilot();
    let mut generator = SensorGenerator::with_seed(7);

    for step in 0..=20u64 {
        let reading = generator.failure(step as f64 / 20.0, step);
        assert!(FAILURE_BANDS.contains(&reading));
        let assessment = copilot.assess(&reading);
        assert!(assessment.risk <= 100);
        assert!((assessment.feature_importance.total() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn test_assess_matches_resolver() {
    let copilot = quick_copilot();
    let reading = SensorReading::new(72.0, 3.0, 71.0, 2.0);
    let assessment = copilot.assess(&reading);

    let expected = copilot.resolver().determine(&reading, assessment.risk);
    assert_eq!(assessment.error.code, expected.as_str());
    assert_eq!(expected, ErrorCode::SlowCycleTime);
}


#[test]
fn test_transport_check_reports_outcome() {
    let copilot = quick_copilot();
    assert_eq!(copilot.test_transport(), DeliveryOutcome::NotConfigured);

    let (transport, _, calls) = RecordingTransport::new(delivered());
    let copilot = copilot.with_transport(Box::new(transport));
    assert!(copilot.test_transport().is_delivered());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
