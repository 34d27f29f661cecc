//! Embedding backfill integration tests
//!
//! Runs the completion loop through the real HTTP client against a mock
//! edge function.

#[cfg(test)]
mod tests {
    use crate::common::{OPENAI_KEY, SERVICE_KEY, test_config};
    use catalog_ingest::commands::generate_embeddings;
    use catalog_ingest::core::embeddings::{
        CompletionLoop, CompletionLoopConfig, EmbeddingFunctionClient,
    };
    use catalog_ingest::{IngestError, StopReason};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FUNCTION_PATH: &str = "/functions/v1/generate-embeddings";

    fn work(processed: u64, remaining: u64) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "processed": processed,
            "remaining": remaining,
            "errors": []
        }))
    }

    async fn mount_once(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(FUNCTION_PATH))
            .respond_with(response)
            .up_to_n_times(1)
            .mount(server)
            .await;
    }

    fn fast_loop() -> CompletionLoopConfig {
        CompletionLoopConfig::new().with_pauses(Duration::ZERO, Duration::ZERO)
    }

    fn short_timeout_client(server: &MockServer) -> EmbeddingFunctionClient {
        EmbeddingFunctionClient::new(
            reqwest::Client::new(),
            format!("{}{}", server.uri(), FUNCTION_PATH),
            OPENAI_KEY,
            Duration::from_millis(200),
        )
    }

    #[tokio::test]
    async fn test_runs_until_remaining_is_zero() {
        let server = MockServer::start().await;
        mount_once(&server, work(100, 50)).await;
        mount_once(&server, work(50, 0)).await;

        let report = generate_embeddings(&test_config(&server.uri()))
            .await
            .unwrap();

        assert_eq!(report.total_processed, 150);
        assert_eq!(report.rounds, 2);
        assert_eq!(report.stop_reason, StopReason::Drained);
        assert!(report.is_complete());
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_sends_credential_page_size_and_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FUNCTION_PATH))
            .and(header("authorization", format!("Bearer {}", SERVICE_KEY).as_str()))
            .and(body_json(json!({ "openai_api_key": OPENAI_KEY, "limit": 100 })))
            .respond_with(work(7, 0))
            .expect(1)
            .mount(&server)
            .await;

        let report = generate_embeddings(&test_config(&server.uri()))
            .await
            .unwrap();
        assert_eq!(report.total_processed, 7);
    }

    #[tokio::test]
    async fn test_configured_page_size_is_sent_as_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FUNCTION_PATH))
            .and(body_json(json!({ "openai_api_key": OPENAI_KEY, "limit": 25 })))
            .respond_with(work(25, 0))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = test_config(&server.uri());
        config.embeddings.page_size = 25;
        generate_embeddings(&config).await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_progress_stops_with_rows_pending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FUNCTION_PATH))
            .respond_with(work(0, 20))
            .mount(&server)
            .await;

        let report = generate_embeddings(&test_config(&server.uri()))
            .await
            .unwrap();

        assert_eq!(report.total_processed, 0);
        assert_eq!(report.rounds, 1);
        assert_eq!(report.stop_reason, StopReason::NoProgress { remaining: 20 });
        assert!(!report.is_complete());
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_stops_with_running_total() {
        let server = MockServer::start().await;
        mount_once(&server, work(100, 300)).await;
        mount_once(
            &server,
            ResponseTemplate::new(401).set_body_json(json!({ "msg": "Invalid JWT" })),
        )
        .await;

        let report = generate_embeddings(&test_config(&server.uri()))
            .await
            .unwrap();

        assert_eq!(report.total_processed, 100);
        assert_eq!(report.stop_reason, StopReason::Rejected { status: 401 });
        assert_eq!(report.last_remaining, Some(300));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FUNCTION_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let report = generate_embeddings(&test_config(&server.uri()))
            .await
            .unwrap();
        assert_eq!(report.stop_reason, StopReason::Rejected { status: 500 });
        assert_eq!(report.requests, 1);
    }

    #[tokio::test]
    async fn test_missing_body_fields_default_to_zero() {
        let server = MockServer::start().await;
        mount_once(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({ "processed": 10 })),
        )
        .await;

        let report = generate_embeddings(&test_config(&server.uri()))
            .await
            .unwrap();

        // remaining defaults to 0, so one round drains the run
        assert_eq!(report.total_processed, 10);
        assert_eq!(report.stop_reason, StopReason::Drained);
    }

    #[tokio::test]
    async fn test_unparseable_body_fails_the_run() {
        let server = MockServer::start().await;
        mount_once(&server, ResponseTemplate::new(200).set_body_string("<html>")).await;

        let report = generate_embeddings(&test_config(&server.uri()))
            .await
            .unwrap();
        assert!(matches!(report.stop_reason, StopReason::Failed(_)));
        assert_eq!(report.total_processed, 0);
    }

    #[tokio::test]
    async fn test_timeout_is_retried_with_same_page_size() {
        let server = MockServer::start().await;
        mount_once(&server, work(100, 50).set_delay(Duration::from_secs(2))).await;
        mount_once(&server, work(100, 50)).await;
        mount_once(&server, work(50, 0)).await;

        let runner = CompletionLoop::new(short_timeout_client(&server), fast_loop());
        let report = runner.run_until_complete().await.unwrap();

        assert_eq!(report.timeouts, 1);
        assert_eq!(report.requests, 3);
        assert_eq!(report.rounds, 2);
        assert_eq!(report.total_processed, 150);
        assert!(report.is_complete());

        let requests = server.received_requests().await.unwrap();
        for request in &requests {
            let body: serde_json::Value = request.body_json().unwrap();
            assert_eq!(body["limit"], 100);
        }
    }

    #[tokio::test]
    async fn test_consecutive_timeouts_are_bounded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FUNCTION_PATH))
            .respond_with(work(1, 1).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let runner = CompletionLoop::new(
            short_timeout_client(&server),
            fast_loop().with_max_consecutive_timeouts(Some(3)),
        );
        let report = runner.run_until_complete().await.unwrap();

        assert_eq!(report.stop_reason, StopReason::TimeoutsExhausted { attempts: 3 });
        assert_eq!(report.timeouts, 3);
        assert_eq!(report.rounds, 0);
    }

    #[tokio::test]
    async fn test_connection_failure_ends_the_run() {
        let client = EmbeddingFunctionClient::new(
            reqwest::Client::new(),
            format!("http://127.0.0.1:1{}", FUNCTION_PATH),
            OPENAI_KEY,
            Duration::from_secs(5),
        );

        let report = CompletionLoop::new(client, fast_loop())
            .run_until_complete()
            .await
            .unwrap();
        assert!(matches!(report.stop_reason, StopReason::Failed(_)));
        assert_eq!(report.requests, 1);
    }

    #[tokio::test]
    async fn test_iteration_cap() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(FUNCTION_PATH))
            .respond_with(work(10, 1000))
            .mount(&server)
            .await;

        let mut config = test_config(&server.uri());
        config.embeddings.max_iterations = Some(3);
        let report = generate_embeddings(&config).await.unwrap();

        assert_eq!(report.rounds, 3);
        assert_eq!(report.total_processed, 30);
        assert_eq!(report.stop_reason, StopReason::IterationCap { remaining: 1000 });
    }

    #[tokio::test]
    async fn test_missing_credentials_send_nothing() {
        let server = MockServer::start().await;

        let mut config = test_config(&server.uri());
        config.embeddings.openai_api_key = None;
        let result = generate_embeddings(&config).await;
        assert!(matches!(result, Err(IngestError::Config(_))));

        let mut config = test_config(&server.uri());
        config.remote.base_url = None;
        let result = generate_embeddings(&config).await;
        assert!(matches!(result, Err(IngestError::Config(_))));

        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
