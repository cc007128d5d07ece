use async_trait::async_trait;
use base64::{prelude::BASE64_STANDARD, Engine};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, error, info};

use crate::application::ports::InferencePort;
use crate::domain::errors::{AnalysisError, AnalysisResult};
use crate::domain::model::WorkflowConfig;

/// Cliente HTTP del workflow alojado. Se construye una vez al arrancar y se comparte.
pub struct RoboflowWorkflowClient {
    client: reqwest::Client,
    config: WorkflowConfig,
}

impl RoboflowWorkflowClient {
    pub fn new(config: WorkflowConfig, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        info!(
            "Cliente de workflow listo: {} (timeout {}s)",
            config.endpoint(),
            timeout.as_secs()
        );
        Self { client, config }
    }

    fn request_body(&self, jpeg: &[u8]) -> Value {
        json!({
            "api_key": self.config.api_key,
            "inputs": {
                "image": { "type": "base64", "value": BASE64_STANDARD.encode(jpeg) }
            }
        })
    }
}

fn transport(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::TransportFailure(e.to_string())
}

/// `Display` de reqwest omite la causa; se encadena toda la cadena de `source()`.
fn describe(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    if e.is_timeout() && !msg.contains("timed out") {
        msg = format!("request timed out: {msg}");
    }
    msg
}

/// El servicio envuelve el resultado en `outputs`; si no está, se devuelve el cuerpo entero.
fn unwrap_outputs(mut body: Value) -> Value {
    match body.get_mut("outputs") {
        Some(outputs) => outputs.take(),
        None => body,
    }
}

#[async_trait]
impl InferencePort for RoboflowWorkflowClient {
    async fn run_workflow(&self, jpeg: &[u8]) -> AnalysisResult<Value> {
        let url = self.config.endpoint();
        debug!(bytes = jpeg.len(), "POST {}", url);

        let res = self
            .client
            .post(&url)
            .json(&self.request_body(jpeg))
            .send()
            .await
            .map_err(|e| {
                let msg = describe(&e);
                error!("❌ Workflow request failed: {}", msg);
                transport(msg)
            })?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            error!("❌ Workflow returned {}: {}", status, detail);
            return Err(transport(format!("workflow returned {}: {}", status, detail.trim())));
        }

        let body = res.json::<Value>().await.map_err(|e| {
            let msg = describe(&e);
            error!("❌ Failed to parse workflow JSON. Status: {}: {}", status, msg);
            transport(msg)
        })?;

        Ok(unwrap_outputs(body))
    }

    fn workflow_id(&self) -> &str {
        &self.config.workflow_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::io::Write;

    fn client_for(server: &mockito::Server) -> RoboflowWorkflowClient {
        let mut cfg = WorkflowConfig::new("test-key");
        cfg.api_url = server.url();
        RoboflowWorkflowClient::new(cfg, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn posts_base64_image_and_unwraps_outputs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/jordans-vibe-check/workflows/detect-and-classify")
            .match_body(Matcher::PartialJson(json!({
                "api_key": "test-key",
                "inputs": { "image": { "type": "base64", "value": BASE64_STANDARD.encode(b"jpeg") } }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"outputs":[{"detection_predictions":{"predictions":[{"class":"happy","confidence":0.9}]}}]}"#)
            .create_async()
            .await;

        let value = client_for(&server).run_workflow(b"jpeg").await.unwrap();
        mock.assert_async().await;
        assert!(value.is_array());
        assert_eq!(value[0]["detection_predictions"]["predictions"][0]["class"], "happy");
    }

    #[tokio::test]
    async fn body_without_outputs_is_returned_as_is() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"detection_predictions":{"predictions":[]}}"#)
            .create_async()
            .await;

        let value = client_for(&server).run_workflow(b"x").await.unwrap();
        assert!(value.get("detection_predictions").is_some());
    }

    #[tokio::test]
    async fn non_success_status_is_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(401)
            .with_body("Unauthorized")
            .create_async()
            .await;

        let err = client_for(&server).run_workflow(b"x").await.unwrap_err();
        match err {
            AnalysisError::TransportFailure(msg) => {
                assert!(msg.contains("401"), "{msg}");
                assert!(msg.contains("Unauthorized"), "{msg}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let err = client_for(&server).run_workflow(b"x").await.unwrap_err();
        assert!(matches!(err, AnalysisError::TransportFailure(_)));
    }

    #[tokio::test]
    async fn slow_response_reports_timed_out() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(3));
                w.write_all(b"{}")
            })
            .create_async()
            .await;

        let mut cfg = WorkflowConfig::new("test-key");
        cfg.api_url = server.url();
        let client = RoboflowWorkflowClient::new(cfg, Duration::from_millis(500));

        let err = client.run_workflow(b"x").await.unwrap_err();
        match err {
            AnalysisError::TransportFailure(msg) => assert!(msg.contains("timed out"), "{msg}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_keeps_the_cause() {
        // puerto libre que se cierra enseguida: conexión rechazada
        let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let mut cfg = WorkflowConfig::new("test-key");
        cfg.api_url = format!("http://127.0.0.1:{port}");
        let client = RoboflowWorkflowClient::new(cfg, Duration::from_secs(2));

        let err = client.run_workflow(b"x").await.unwrap_err();
        match err {
            AnalysisError::TransportFailure(msg) => {
                assert!(msg.starts_with("error sending request"), "{msg}");
                assert!(msg.matches(": ").count() >= 1, "{msg}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn workflow_id_comes_from_config() {
        let mut cfg = WorkflowConfig::new("k");
        cfg.workflow_id = "emotions-v2".into();
        let client = RoboflowWorkflowClient::new(cfg, Duration::from_secs(1));
        assert_eq!(client.workflow_id(), "emotions-v2");
    }
}
