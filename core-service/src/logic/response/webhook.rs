//! Webhook Transport
//!
//! Posts alert payloads to a workflow automation endpoint (n8n or similar).
//! One attempt per alert with a bounded timeout; the outcome is returned as
//! a value, never as an error.

use std::time::Duration;

use super::types::{AlertPayload, DeliveryOutcome, WorkflowResponse};

/// Longest response body kept in an outcome
pub const MAX_BODY_LENGTH: usize = 1000;

// ============================================================================
// TRANSPORT TRAIT
// ============================================================================

/// Anything that can carry an alert to the outside world
pub trait AlertTransport: Send + Sync {
    fn name(&self) -> &str;
    fn deliver(&self, payload: &AlertPayload) -> DeliveryOutcome;
    /// Connectivity check with a minimal test message
    fn check(&self) -> DeliveryOutcome;
}

// ============================================================================
// WEBHOOK
// ============================================================================

pub struct WebhookTransport {
    url: Option<String>,
    timeout: Duration,
    agent: ureq::Agent,
}

impl WebhookTransport {
    pub fn new(url: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            url: url.filter(|u| !u.trim().is_empty()),
            timeout,
            agent,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn post(&self, body: &str) -> DeliveryOutcome {
        let Some(url) = self.url.as_deref() else {
            return DeliveryOutcome::NotConfigured;
        };

        let result = self
            .agent
            .post(url)
            .set("Content-Type", "application/json")
            .send_string(body);

        match result {
            Ok(resp) => {
                let status_code = resp.status();
                let text = resp.into_string().unwrap_or_default();
                let response = serde_json::from_str::<serde_json::Value>(&text)
                    .map(|v| WorkflowResponse::extract(&v))
                    .unwrap_or_default();
                log::info!("Alert delivered to webhook ({})", status_code);
                DeliveryOutcome::Delivered {
                    status_code,
                    body: truncate(&text, MAX_BODY_LENGTH),
                    response,
                }
            }
            Err(ureq::Error::Status(status_code, resp)) => {
                let text = resp.into_string().unwrap_or_default();
                log::warn!("Webhook returned status {}", status_code);
                DeliveryOutcome::Rejected {
                    status_code,
                    body: truncate(&text, MAX_BODY_LENGTH),
                }
            }
            Err(ureq::Error::Transport(transport)) => {
                if is_timeout(&transport) {
                    log::warn!("Webhook timed out after {}s", self.timeout.as_secs());
                    DeliveryOutcome::TimedOut {
                        timeout_secs: self.timeout.as_secs(),
                    }
                } else {
                    log::warn!("Webhook transport error: {}", transport);
                    DeliveryOutcome::TransportError {
                        message: transport.to_string(),
                    }
                }
            }
        }
    }
}

impl AlertTransport for WebhookTransport {
    fn name(&self) -> &str {
        "webhook"
    }

    fn deliver(&self, payload: &AlertPayload) -> DeliveryOutcome {
        match serde_json::to_string(payload) {
            Ok(body) => self.post(&body),
            Err(e) => DeliveryOutcome::TransportError {
                message: format!("Failed to serialize payload: {}", e),
            },
        }
    }

    fn check(&self) -> DeliveryOutcome {
        let body = serde_json::json!({
            "alert_type": "test",
            "message": "Factory copilot webhook test",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        self.post(&body.to_string())
    }
}

fn is_timeout(transport: &ureq::Transport) -> bool {
    let io_timeout = std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .map(|io| matches!(io.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock))
        .unwrap_or(false);

    io_timeout || transport.to_string().to_lowercase().contains("timed out")
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use crate::logic::response::gate::NotificationGate;
    use crate::logic::sensor::SensorReading;

    /// One-shot HTTP endpoint: reads the request, answers with `response`
    /// (or holds the connection open when `None`) and returns its URL.
    fn serve_once(response: Option<String>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf);
                match response {
                    Some(resp) => {
                        let _ = stream.write_all(resp.as_bytes());
                        let _ = stream.flush();
                    }
                    None => thread::sleep(Duration::from_secs(3)),
                }
            }
        });
        format!("http://{}/webhook", addr)
    }

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    fn payload() -> AlertPayload {
        NotificationGate::default()
            .evaluate(&SensorReading::new(85.5, 8.2, 65.3, 12.0), 85, None)
            .payload
            .unwrap()
    }

    #[test]
    fn test_missing_url_is_not_configured() {
        let transport = WebhookTransport::new(None, Duration::from_secs(1));
        assert!(!transport.is_configured());
        assert_eq!(transport.deliver(&payload()), DeliveryOutcome::NotConfigured);

        let blank = WebhookTransport::new(Some("   ".to_string()), Duration::from_secs(1));
        assert!(!blank.is_configured());
    }

    #[test]
    fn test_unreachable_endpoint_is_a_value() {
        // Port 9 (discard) on localhost is normally closed
        let transport = WebhookTransport::new(
            Some("http://127.0.0.1:9/webhook".to_string()),
            Duration::from_secs(2),
        );
        let outcome = transport.deliver(&payload());
        assert!(!outcome.is_delivered());
        assert!(matches!(
            outcome,
            DeliveryOutcome::TransportError { .. } | DeliveryOutcome::TimedOut { .. }
        ));
    }

    #[test]
    fn test_server_error_is_rejected() {
        let url = serve_once(Some(http_response("500 Internal Server Error", "boom")));
        let transport = WebhookTransport::new(Some(url), Duration::from_secs(5));

        let outcome = transport.deliver(&payload());
        assert_eq!(
            outcome,
            DeliveryOutcome::Rejected {
                status_code: 500,
                body: "boom".to_string(),
            }
        );
        assert!(!outcome.is_delivered());
    }

    #[test]
    fn test_success_is_delivered_with_workflow_output() {
        let body = r#"{"output":"Check cooling"}"#;
        let url = serve_once(Some(http_response("200 OK", body)));
        let transport = WebhookTransport::new(Some(url), Duration::from_secs(5));

        match transport.deliver(&payload()) {
            DeliveryOutcome::Delivered {
                status_code,
                body: echoed,
                response,
            } => {
                assert_eq!(status_code, 200);
                assert_eq!(echoed, body);
                assert_eq!(response.ai_output.as_deref(), Some("Check cooling"));
            }
            other => panic!("expected delivery, got {:?}", other),
        }
    }

    #[test]
    fn test_silent_endpoint_times_out() {
        let url = serve_once(None);
        let transport = WebhookTransport::new(Some(url), Duration::from_secs(1));

        assert_eq!(
            transport.deliver(&payload()),
            DeliveryOutcome::TimedOut { timeout_secs: 1 }
        );
    }

    #[test]
    fn test_check_posts_test_message() {
        let url = serve_once(Some(http_response("202 Accepted", "")));
        let transport = WebhookTransport::new(Some(url.clone()), Duration::from_secs(5));
        assert_eq!(transport.url(), Some(url.as_str()));

        let outcome = transport.check();
        assert!(outcome.is_delivered(), "got {:?}", outcome);

        let missing = WebhookTransport::new(None, Duration::from_secs(1));
        assert_eq!(missing.check(), DeliveryOutcome::NotConfigured);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
    }
}
