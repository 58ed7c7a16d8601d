//! Item processor tests against a mock endpoint

#[cfg(test)]
mod tests {
    use crate::common::server::{SUBMIT_PATH, pool_exhausted};
    use crate::common::{ConfigFactory, MockEndpoint};
    use gtin_loader::ItemError;
    use gtin_loader::auth::AuthHeaders;
    use gtin_loader::core::{HttpItemProcessor, ItemProcessor};
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    const GTIN: &str = "07502209290686";

    fn processor(api_url: &str) -> HttpItemProcessor {
        let config = ConfigFactory::for_endpoint(api_url);
        let headers = AuthHeaders::bearer("test-token").unwrap();
        HttpItemProcessor::new(&config.endpoint, &config.dispatch, &headers).unwrap()
    }

    // ==================== Request Shape ====================

    #[tokio::test]
    async fn test_request_carries_payload_and_auth_headers() {
        let endpoint = MockEndpoint::start().await;
        Mock::given(method("POST"))
            .and(path(SUBMIT_PATH))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(json!({
                "gtin": GTIN,
                "gln": "0000000000000",
                "reprocess": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .expect(1)
            .mount(&endpoint.server)
            .await;

        let outcome = processor(&endpoint.url()).process(GTIN).await;

        assert!(outcome.success);
        assert_eq!(outcome.status_code, Some(201));
        assert_eq!(outcome.detail, "created");
        assert_eq!(outcome.retries_used, 0);
    }

    // ==================== Classification ====================

    #[tokio::test]
    async fn test_pool_exhaustion_is_classified() {
        let endpoint = MockEndpoint::start().await;
        Mock::given(method("POST"))
            .respond_with(pool_exhausted())
            .mount(&endpoint.server)
            .await;

        let outcome = processor(&endpoint.url()).process(GTIN).await;

        assert!(!outcome.success);
        assert_eq!(outcome.status_code, Some(500));
        assert!(outcome.is_pool_exhaustion());
    }

    #[tokio::test]
    async fn test_plain_http_error_is_not_pool_exhaustion() {
        let endpoint = MockEndpoint::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&endpoint.server)
            .await;

        let outcome = processor(&endpoint.url()).process(GTIN).await;

        assert!(!outcome.success);
        assert_eq!(
            outcome.error,
            Some(ItemError::Http {
                status: 404,
                body: "not found".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_signature_beyond_preview_still_detected() {
        let endpoint = MockEndpoint::start().await;
        let body = format!("{} QueuePool limit reached", "x".repeat(500));
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string(body))
            .mount(&endpoint.server)
            .await;

        let outcome = processor(&endpoint.url()).process(GTIN).await;

        assert!(outcome.is_pool_exhaustion());
        assert_eq!(outcome.detail.chars().count(), 200);
    }

    #[tokio::test]
    async fn test_success_body_is_truncated() {
        let endpoint = MockEndpoint::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("y".repeat(1000)))
            .mount(&endpoint.server)
            .await;

        let outcome = processor(&endpoint.url()).process(GTIN).await;

        assert!(outcome.success);
        assert_eq!(outcome.detail.len(), 200);
    }

    // ==================== Transport Failures ====================

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let endpoint = MockEndpoint::start().await;
        let url = endpoint.url();
        drop(endpoint);

        let outcome = processor(&url).process(GTIN).await;

        assert!(!outcome.success);
        assert_eq!(outcome.status_code, None);
        assert!(matches!(outcome.error, Some(ItemError::Transport { .. })));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let endpoint = MockEndpoint::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&endpoint.server)
            .await;

        let mut config = ConfigFactory::for_endpoint(&endpoint.url());
        config.dispatch.request_timeout = 1;
        let headers = AuthHeaders::bearer("test-token").unwrap();
        let processor =
            HttpItemProcessor::new(&config.endpoint, &config.dispatch, &headers).unwrap();

        let outcome = processor.process(GTIN).await;

        assert!(!outcome.success);
        assert!(outcome.detail.contains("timed out"));
    }

    #[tokio::test]
    async fn test_stalled_body_after_ok_status_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial")
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let mut config = ConfigFactory::for_endpoint(&format!("http://{}/submit", addr));
        config.dispatch.request_timeout = 1;
        let headers = AuthHeaders::bearer("test-token").unwrap();
        let processor =
            HttpItemProcessor::new(&config.endpoint, &config.dispatch, &headers).unwrap();

        let outcome = processor.process(GTIN).await;

        assert!(!outcome.success);
        assert_eq!(outcome.status_code, None);
        assert!(matches!(outcome.error, Some(ItemError::Transport { .. })));
        assert!(outcome.detail.contains("timed out"));
    }
}
