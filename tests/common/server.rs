//! Mock remote endpoint helpers

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SUBMIT_PATH: &str = "/api/v1/product/description/generate";
pub const POOL_EXHAUSTED_BODY: &str =
    "sqlalchemy.exc.TimeoutError: QueuePool limit of size 5 overflow 10 reached";

/// Mock product endpoint
pub struct MockEndpoint {
    pub server: MockServer,
}

impl MockEndpoint {
    pub async fn start() -> Self {
        Self {
            server: MockServer::builder().start().await,
        }
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.server.uri(), SUBMIT_PATH)
    }

    /// Every submission without a more specific mock succeeds
    pub async fn accept_all(&self) {
        Mock::given(method("POST"))
            .and(path(SUBMIT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&self.server)
            .await;
    }

    /// `identifier` gets `response` for its first `times` submissions
    pub async fn respond_for(&self, identifier: &str, response: ResponseTemplate, times: u64) {
        Mock::given(method("POST"))
            .and(path(SUBMIT_PATH))
            .and(body_partial_json(json!({ "gtin": identifier })))
            .respond_with(response)
            .up_to_n_times(times)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Submissions received so far for `identifier`
    pub async fn submissions_for(&self, identifier: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| {
                serde_json::from_slice::<serde_json::Value>(&r.body)
                    .map(|v| v["gtin"] == identifier)
                    .unwrap_or(false)
            })
            .count()
    }
}

pub fn pool_exhausted() -> ResponseTemplate {
    ResponseTemplate::new(500).set_body_string(POOL_EXHAUSTED_BODY)
}

pub fn server_error() -> ResponseTemplate {
    ResponseTemplate::new(500).set_body_string("Internal Server Error")
}
