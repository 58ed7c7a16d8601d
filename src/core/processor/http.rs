//! HTTP-backed item processor

use super::ItemProcessor;
use super::classify::ResponseClassifier;
use crate::auth::AuthHeaders;
use crate::config::{DispatchConfig, EndpointConfig};
use crate::core::types::Outcome;
use crate::utils::error::{DispatchError, ItemError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// JSON body of one submission
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub gtin: &'a str,
    pub gln: &'a str,
    pub reprocess: bool,
}

/// Submits identifiers to the remote endpoint with the auth headers attached
/// to every request.
pub struct HttpItemProcessor {
    client: Client,
    api_url: String,
    secondary_key: String,
    reprocess: bool,
    timeout: Duration,
    classifier: ResponseClassifier,
}

impl HttpItemProcessor {
    /// Build the processor; auth headers become client default headers
    pub fn new(
        endpoint: &EndpointConfig,
        dispatch: &DispatchConfig,
        headers: &AuthHeaders,
    ) -> Result<Self> {
        let timeout = dispatch.request_timeout_duration();
        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(&endpoint.user_agent)
            .default_headers(headers.header_map().clone())
            .build()
            .map_err(|e| DispatchError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: endpoint.api_url.clone(),
            secondary_key: endpoint.secondary_key.clone(),
            reprocess: endpoint.reprocess,
            timeout,
            classifier: ResponseClassifier::from_config(dispatch),
        })
    }

    fn describe_transport_error(&self, error: &reqwest::Error) -> String {
        if error.is_timeout() {
            format!(
                "request timed out after {}s: {}",
                self.timeout.as_secs(),
                error
            )
        } else if error.is_connect() {
            format!("connection error: {}", error)
        } else {
            error.to_string()
        }
    }
}

#[async_trait]
impl ItemProcessor for HttpItemProcessor {
    async fn process(&self, identifier: &str) -> Outcome {
        let start = Instant::now();
        let payload = SubmitRequest {
            gtin: identifier,
            gln: &self.secondary_key,
            reprocess: self.reprocess,
        };

        debug!(gtin = identifier, url = %self.api_url, "Submitting identifier");

        let response = match self.client.post(&self.api_url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = ItemError::transport(self.describe_transport_error(&e));
                warn!(gtin = identifier, error = %error, "Request failed");
                return Outcome::failed(identifier, error, start.elapsed());
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let error = ItemError::transport(self.describe_transport_error(&e));
                warn!(gtin = identifier, status, error = %error, "Reading response body failed");
                return Outcome::failed(identifier, error, start.elapsed());
            }
        };
        let latency = start.elapsed();

        match self.classifier.classify(status, &body) {
            Ok(preview) => {
                info!(
                    gtin = identifier,
                    status,
                    "Processed successfully in {:.2}s",
                    latency.as_secs_f64()
                );
                Outcome::succeeded(identifier, status, latency, preview)
            }
            Err(error) => {
                warn!(gtin = identifier, status, body = error.detail(), "Request rejected");
                if error.is_pool_exhaustion() {
                    warn!(gtin = identifier, "Remote connection pool exhaustion detected");
                }
                Outcome::failed(identifier, error, latency)
            }
        }
    }
}
