use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};

use super::error::GatewayError;
use super::types::{ErrorBody, ProcessLectureResponse};
use crate::config::LectioConfig;

const PROCESS_PATH: &str = "/process-lecture/";

/// Sends one lecture recording to the processing service and returns the
/// transcript/summary/quiz bundle. Implemented by [`HttpGateway`] and by
/// test mocks.
#[allow(async_fn_in_trait)]
pub trait LectureProcessor {
    async fn process_lecture(
        &self,
        file_name: &str,
        audio: Vec<u8>,
    ) -> Result<ProcessLectureResponse, GatewayError>;
}

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &LectioConfig) -> Self {
        Self::with_base_url(&config.service_url, config.request_timeout_secs)
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(base_url: &str, request_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl LectureProcessor for HttpGateway {
    async fn process_lecture(
        &self,
        file_name: &str,
        audio: Vec<u8>,
    ) -> Result<ProcessLectureResponse, GatewayError> {
        let part = Part::bytes(audio).file_name(file_name.to_string());
        let form = Form::new().part("audio_file", part);

        let response = self
            .client
            .post(format!("{}{PROCESS_PATH}", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the service's own message; fall back to the raw body.
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|parsed| parsed.message().to_string())
                .unwrap_or(body);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SUCCESS_BODY: &str = r#"{
        "filename": "lecture.wav",
        "transcription": "Today we cover Paris.",
        "summary": "Paris.",
        "quizzes": [
            {"type": "blank", "question": "Capital of France is ____.", "answer": "Paris"}
        ]
    }"#;

    #[tokio::test]
    async fn success_response_parses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-lecture/"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(SUCCESS_BODY, "application/json"))
            .mount(&server)
            .await;

        let gateway = HttpGateway::with_base_url(&server.uri(), 5);
        let response = gateway
            .process_lecture("lecture.wav", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(response.transcription, "Today we cover Paris.");
        assert_eq!(response.summary, "Paris.");
        assert_eq!(response.quizzes.len(), 1);
    }

    #[tokio::test]
    async fn rejection_surfaces_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-lecture/"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_raw(r#"{"error": "no speech detected"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let gateway = HttpGateway::with_base_url(&server.uri(), 5);
        let err = gateway
            .process_lecture("lecture.wav", vec![1])
            .await
            .unwrap_err();

        match err {
            GatewayError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "no speech detected");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejection_without_json_body_keeps_raw_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-lecture/"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let gateway = HttpGateway::with_base_url(&server.uri(), 5);
        let err = gateway
            .process_lecture("lecture.wav", vec![1])
            .await
            .unwrap_err();

        match err {
            GatewayError::Rejected { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process-lecture/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"transcription": 42}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let gateway = HttpGateway::with_base_url(&server.uri(), 5);
        let err = gateway
            .process_lecture("lecture.wav", vec![1])
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Parse(_)));
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        // Nothing listens on this port.
        let gateway = HttpGateway::with_base_url("http://127.0.0.1:9", 1);
        let err = gateway
            .process_lecture("lecture.wav", vec![1])
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Unreachable(_)));
    }
}
