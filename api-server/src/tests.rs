use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use factory_copilot_core::logic::model::{ForestParams, TrainingConfig};
use factory_copilot_core::logic::response::{AlertTransport, WorkflowResponse};
use factory_copilot_core::{AlertPayload, Copilot, CopilotConfig, DeliveryOutcome};

use crate::config::Config;
use crate::{create_router, AppState};

struct FixedTransport(DeliveryOutcome);

impl AlertTransport for FixedTransport {
    fn name(&self) -> &str {
        "fixed"
    }

    fn deliver(&self, _payload: &AlertPayload) -> DeliveryOutcome {
        self.0.clone()
    }

    fn check(&self) -> DeliveryOutcome {
        self.0.clone()
    }
}

fn app_with(outcome: Option<DeliveryOutcome>) -> Router {
    let copilot_config = CopilotConfig {
        training: TrainingConfig {
            n_samples: 400,
            forest: ForestParams { n_estimators: 20, ..Default::default() },
            ..Default::default()
        },
        ..Default::default()
    };

    let mut copilot = Copilot::from_config(&copilot_config);
    if let Some(outcome) = outcome {
        copilot = copilot.with_transport(Box::new(FixedTransport(outcome)));
    }
    copilot.warm_up();

    let config = Config {
        port: 0,
        environment: "test".to_string(),
        copilot: copilot_config,
    };
    create_router(AppState::new(Arc::new(copilot), config))
}

fn app() -> Router {
    app_with(None)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_trained_model() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_trained"], true);
    assert_eq!(body["model_type"], "RandomForestClassifier");
}

#[tokio::test]
async fn test_root_banner() {
    let (status, body) = send(app(), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "Factory Copilot");
}

#[tokio::test]
async fn test_predict_returns_risk_and_importance() {
    let reading = json!({ "temperature": 65.0, "vibration": 2.3, "cycle_time": 42.5, "error_count": 0 });
    let (status, body) = send(app(), post("/predict", reading)).await;

    assert_eq!(status, StatusCode::OK);
    let risk = body["risk"].as_u64().unwrap();
    assert!(risk <= 100);

    let importance = body["feature_importance"].as_object().unwrap();
    assert_eq!(importance.len(), 4);
    let total: f64 = importance.values().map(|v| v.as_f64().unwrap()).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_predict_lists_missing_fields() {
    let (status, body) = send(app(), post("/predict", json!({ "temperature": 70.0 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("vibration"));
    assert!(message.contains("cycle_time"));
    assert!(message.contains("error_count"));
}

#[tokio::test]
async fn test_error_code_resolution() {
    let request = json!({
        "sensor_data": { "temperature": 85.5, "vibration": 8.2, "cycle_time": 65.3, "error_count": 12 },
        "risk_score": 85
    });
    let (status, body) = send(app(), post("/error-code", request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "E006");
    assert_eq!(body["severity"], "HIGH");
}

#[tokio::test]
async fn test_error_code_rejects_out_of_range_risk() {
    let request = json!({
        "sensor_data": { "temperature": 70, "vibration": 2, "cycle_time": 40, "error_count": 0 },
        "risk_score": 140
    });
    let (status, _) = send(app(), post("/error-code", request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_code_catalogue() {
    let (status, body) = send(app(), get("/error-codes")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 7);

    let (_, body) = send(app(), get("/error-codes/E005")).await;
    assert_eq!(body["description"], "Critical Risk");

    let (status, body) = send(app(), get("/error-codes/E999")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["severity"], "UNKNOWN");
}

#[tokio::test]
async fn test_assess_delivers_triggered_alert() {
    let delivered = DeliveryOutcome::Delivered {
        status_code: 200,
        body: "ok".to_string(),
        response: WorkflowResponse::default(),
    };
    let reading = json!({ "temperature": 110, "vibration": 14, "cycle_time": 75, "error_count": 20 });
    let (status, body) = send(app_with(Some(delivered)), post("/assess", reading)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].is_string());
    assert_eq!(body["assessment"]["alert"]["triggered"], true);
    assert_eq!(body["assessment"]["alert"]["payload"]["error_code"], "E001");
    assert_eq!(body["delivery"]["status"], "delivered");
}

#[tokio::test]
async fn test_assess_survives_delivery_timeout() {
    let reading = json!({ "temperature": 110, "vibration": 14, "cycle_time": 75, "error_count": 20 });
    let (status, body) = send(
        app_with(Some(DeliveryOutcome::TimedOut { timeout_secs: 30 })),
        post("/assess", reading),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["assessment"]["risk"].as_u64().unwrap() >= 75);
    assert_eq!(body["delivery"]["status"], "timed_out");
}

#[tokio::test]
async fn test_webhook_test_reports_outcome() {
    let (status, body) = send(app(), post("/webhook/test", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "not_configured");

    let rejected = DeliveryOutcome::Rejected { status_code: 404, body: "no workflow".to_string() };
    let (status, body) = send(app_with(Some(rejected)), post("/webhook/test", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["status_code"], 404);
}

#[tokio::test]
async fn test_assess_below_threshold_skips_delivery() {
    let reading = json!({ "temperature": 65, "vibration": 2.3, "cycle_time": 42.5, "error_count": 0 });
    let (status, body) = send(app(), post("/assess", reading)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assessment"]["alert"]["triggered"], false);
    assert!(body.get("delivery").is_none());
}

#[tokio::test]
async fn test_simulate_failure_mode() {
    let (status, body) = send(app(), get("/simulate?mode=failure&progress=1.0&history_length=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["temperature"].as_f64().unwrap() >= 65.0);
    assert!(body["temperature"].as_f64().unwrap() <= 110.0);

    let (status, _) = send(app(), get("/simulate?mode=failure&progress=2.5")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trends_heuristic() {
    let history = json!([
        { "temperature": 70, "vibration": 2, "cycle_time": 44, "error_count": 0 },
        { "temperature": 80, "vibration": 4, "cycle_time": 50, "error_count": 2 },
        { "temperature": 92, "vibration": 7, "cycle_time": 58, "error_count": 5 }
    ]);
    let (status, body) = send(app(), post("/trends", history)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "heuristic");
    assert_eq!(body["anomalies"].as_array().unwrap().len(), 2);

    let (_, body) = send(app(), post("/trends", json!([]))).await;
    assert_eq!(body["status"], "no_data");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let (status, body) = send(app(), get("/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}
