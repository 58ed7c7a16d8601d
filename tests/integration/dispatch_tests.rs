//! End-to-end dispatch runs against a mock endpoint

#[cfg(test)]
mod tests {
    use crate::common::assertions::SummaryAssertions;
    use crate::common::server::{pool_exhausted, server_error};
    use crate::common::{ConfigFactory, MockEndpoint, identifiers};
    use gtin_loader::auth::{StaticTokenAuthenticator, authenticator_from_config};
    use gtin_loader::core::RecordingSleeper;
    use gtin_loader::reporting::{CsvReporter, MemoryReporter};
    use gtin_loader::sources::{FileSource, InlineSource};
    use gtin_loader::{Config, DispatchError, Dispatcher};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const X: &str = "7501111111111";
    const Y: &str = "7502222222222";

    fn secs(values: &[u64]) -> Vec<Duration> {
        values.iter().map(|s| Duration::from_secs(*s)).collect()
    }

    fn dispatcher(config: Config, sleeper: &Arc<RecordingSleeper>) -> Dispatcher {
        Dispatcher::new(config).with_sleeper(sleeper.clone())
    }

    fn inline(ids: Vec<String>) -> InlineSource {
        InlineSource::new(ids, Some("test identifiers".to_string()))
    }

    #[tokio::test]
    async fn test_nine_identifiers_all_succeed() {
        let endpoint = MockEndpoint::start().await;
        endpoint.accept_all().await;
        let mut config = ConfigFactory::for_endpoint(&endpoint.url());
        config.dispatch.num_chunks = 3;
        config.dispatch.workers = 2;
        let sleeper = Arc::new(RecordingSleeper::new());
        let reporter = MemoryReporter::new();

        let summary = dispatcher(config, &sleeper)
            .run(
                &StaticTokenAuthenticator::new("test-token"),
                &inline(identifiers(9)),
                &reporter,
            )
            .await
            .unwrap();

        summary.assert_counts(9, 9, 0);
        let records = reporter.records();
        assert_eq!(records.len(), 9);
        assert!(records.iter().all(|r| r.success && r.retries_used == 0));
        for chunk in 1..=3 {
            assert_eq!(records.iter().filter(|r| r.chunk_index == chunk).count(), 3);
        }
        // Only the two pauses between chunks
        assert_eq!(sleeper.waits(), secs(&[5, 5]));
    }

    #[tokio::test]
    async fn test_pool_exhaustion_then_success() {
        let endpoint = MockEndpoint::start().await;
        endpoint.respond_for(X, pool_exhausted(), 2).await;
        endpoint.accept_all().await;
        let mut config = ConfigFactory::for_endpoint(&endpoint.url());
        config.dispatch.num_chunks = 1;
        let sleeper = Arc::new(RecordingSleeper::new());
        let reporter = MemoryReporter::new();

        let ids = vec![X.to_string(), identifiers(1).remove(0)];
        let summary = dispatcher(config, &sleeper)
            .run(&StaticTokenAuthenticator::new("t"), &inline(ids), &reporter)
            .await
            .unwrap();

        summary.assert_counts(2, 2, 0);
        let record = reporter
            .records()
            .into_iter()
            .find(|r| r.identifier == X)
            .unwrap();
        assert!(record.success);
        assert_eq!(record.retries_used, 2);
        assert_eq!(sleeper.waits(), secs(&[5, 10]));
        assert_eq!(endpoint.submissions_for(X).await, 3);
    }

    #[tokio::test]
    async fn test_generic_failure_exhausts_attempts() {
        let endpoint = MockEndpoint::start().await;
        endpoint.respond_for(Y, server_error(), 10).await;
        endpoint.accept_all().await;
        let mut config = ConfigFactory::for_endpoint(&endpoint.url());
        config.dispatch.max_retries = 4;
        let sleeper = Arc::new(RecordingSleeper::new());
        let reporter = MemoryReporter::new();

        let summary = dispatcher(config, &sleeper)
            .run(
                &StaticTokenAuthenticator::new("t"),
                &inline(vec![Y.to_string()]),
                &reporter,
            )
            .await
            .unwrap();

        summary.assert_counts(1, 0, 1);
        let record = &reporter.records()[0];
        assert!(!record.success);
        assert_eq!(record.retries_used, 3);
        assert_eq!(record.status_code, Some(500));
        assert_eq!(sleeper.waits(), secs(&[3, 6, 9]));
        assert_eq!(endpoint.submissions_for(Y).await, 4);
        assert_eq!(summary.retries.max, 3);
    }

    #[tokio::test]
    async fn test_missing_source_falls_back_to_backup() {
        let endpoint = MockEndpoint::start().await;
        endpoint.accept_all().await;
        let dir = TempDir::new().unwrap();
        let config = ConfigFactory::for_endpoint(&endpoint.url());
        let sleeper = Arc::new(RecordingSleeper::new());
        let reporter = MemoryReporter::new();
        let source = FileSource::new(dir.path().join("gtins_extracted.yaml"), Vec::new());

        let summary = dispatcher(config, &sleeper)
            .run(&StaticTokenAuthenticator::new("t"), &source, &reporter)
            .await
            .unwrap();

        summary.assert_counts(8, 8, 0);
        assert_eq!(
            reporter.header().unwrap().source_description,
            "Backup identifiers (built-in)"
        );
    }

    #[tokio::test]
    async fn test_auth_failure_submits_nothing() {
        let endpoint = MockEndpoint::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&endpoint.server)
            .await;
        let token_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&token_server)
            .await;

        let mut config = ConfigFactory::for_endpoint(&endpoint.url());
        config.auth.static_token = None;
        config.auth.token_url = Some(format!("{}/oauth/token", token_server.uri()));
        config.auth.username = Some("user".to_string());
        config.auth.password = Some("pass".to_string());
        let authenticator = authenticator_from_config(&config.auth).unwrap();
        let sleeper = Arc::new(RecordingSleeper::new());

        let result = dispatcher(config, &sleeper)
            .run(
                authenticator.as_ref(),
                &inline(identifiers(3)),
                &MemoryReporter::new(),
            )
            .await;

        assert!(matches!(result, Err(DispatchError::Auth(_))));
    }

    #[tokio::test]
    async fn test_cap_applies_end_to_end() {
        let endpoint = MockEndpoint::start().await;
        endpoint.accept_all().await;
        let mut config = ConfigFactory::for_endpoint(&endpoint.url());
        config.dispatch.total_cap = 4;
        let sleeper = Arc::new(RecordingSleeper::new());

        let summary = dispatcher(config, &sleeper)
            .run(
                &StaticTokenAuthenticator::new("t"),
                &inline(identifiers(10)),
                &MemoryReporter::new(),
            )
            .await
            .unwrap();

        summary.assert_counts(4, 4, 0);
        assert_eq!(summary.planned, 4);
        assert_eq!(
            endpoint.server.received_requests().await.unwrap().len(),
            4
        );
    }

    #[tokio::test]
    async fn test_run_writes_csv_results() {
        let endpoint = MockEndpoint::start().await;
        endpoint.accept_all().await;
        let dir = TempDir::new().unwrap();
        let config = ConfigFactory::with_results_dir(&endpoint.url(), dir.path());
        let sleeper = Arc::new(RecordingSleeper::new());
        let reporter = CsvReporter::in_dir(dir.path(), "20250101_000000").unwrap();

        dispatcher(config, &sleeper)
            .run(
                &StaticTokenAuthenticator::new("t"),
                &inline(identifiers(6)),
                &reporter,
            )
            .await
            .unwrap();

        let csv = std::fs::read_to_string(reporter.path()).unwrap();
        let data_rows = csv.lines().filter(|l| l.starts_with("750")).count();
        assert_eq!(data_rows, 6);
        assert!(csv.contains("Identifier source: test identifiers"));
        assert!(csv.contains("===== FINAL PROCESSING SUMMARY ====="));
        assert!(csv.contains("Total processed,6/6"));
    }
}
