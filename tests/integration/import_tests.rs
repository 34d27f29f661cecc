//! Bulk import integration tests
//!
//! Drives `import_products` end to end: JSON file on disk, real HTTP
//! client, mock REST gateway.

#[cfg(test)]
mod tests {
    use crate::common::{
        ProductFactory, SERVICE_KEY, SUPPLIER_BINDI, SUPPLIER_MARR, StatusSequence, batch_sizes,
        test_config, write_products_file,
    };
    use catalog_ingest::IngestError;
    use catalog_ingest::commands::{ImportOptions, import_products};
    use catalog_ingest::config::{Config, SupplierDirectory};
    use catalog_ingest::core::batch::BatchDisposition;
    use catalog_ingest::core::models::ProductRecord;
    use std::path::Path;
    use tempfile::NamedTempFile;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TABLE_PATH: &str = "/rest/v1/products";

    fn import_config(server: &MockServer, file: &NamedTempFile) -> Config {
        let mut config = test_config(&server.uri());
        config.import.json_file = file.path().to_path_buf();
        config
    }

    async fn mount_statuses(server: &MockServer, statuses: &[u16]) {
        Mock::given(method("POST"))
            .and(path(TABLE_PATH))
            .respond_with(StatusSequence::new(statuses))
            .mount(server)
            .await;
    }

    fn run() -> ImportOptions {
        ImportOptions::default()
    }

    #[tokio::test]
    async fn test_inserts_in_fixed_size_batches() {
        let server = MockServer::start().await;
        mount_statuses(&server, &[201]).await;
        let file = write_products_file(&ProductFactory::many(1250));

        let report = import_products(&import_config(&server, &file), &run())
            .await
            .unwrap();
        let summary = report.summary.unwrap();

        assert_eq!(batch_sizes(&server).await, vec![500, 500, 250]);
        assert_eq!(report.total_records, 1250);
        assert_eq!(summary.total_batches, 3);
        assert_eq!(summary.total_inserted, 1250);
        assert_eq!(summary.total_errors, 0);
        assert_eq!(summary.percent_inserted(), 100);
        assert!(summary.is_clean());
    }

    #[tokio::test]
    async fn test_batches_preserve_input_order() {
        let server = MockServer::start().await;
        mount_statuses(&server, &[201]).await;
        let file = write_products_file(&ProductFactory::many(5));

        let mut config = import_config(&server, &file);
        config.import.batch_size = 2;
        import_products(&config, &run()).await.unwrap();

        let codes: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .flat_map(|request| request.body_json::<Vec<ProductRecord>>().unwrap())
            .map(|record| record.supplier_code)
            .collect();
        assert_eq!(codes, vec!["P0", "P1", "P2", "P3", "P4"]);
        assert_eq!(batch_sizes(&server).await, vec![2, 2, 1]);
    }

    #[tokio::test]
    async fn test_sends_gateway_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TABLE_PATH))
            .and(header("apikey", SERVICE_KEY))
            .and(header("authorization", format!("Bearer {}", SERVICE_KEY).as_str()))
            .and(header("prefer", "return=minimal"))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        let file = write_products_file(&ProductFactory::many(3));

        let report = import_products(&import_config(&server, &file), &run())
            .await
            .unwrap();
        assert_eq!(report.summary.unwrap().total_inserted, 3);
    }

    #[tokio::test]
    async fn test_duplicate_key_batch_is_skipped() {
        let server = MockServer::start().await;
        mount_statuses(&server, &[201, 409, 201]).await;
        let file = write_products_file(&ProductFactory::many(1250));

        let summary = import_products(&import_config(&server, &file), &run())
            .await
            .unwrap()
            .summary
            .unwrap();

        assert_eq!(batch_sizes(&server).await.len(), 3);
        assert_eq!(summary.total_inserted, 750);
        assert_eq!(summary.conflicts, 1);
        assert_eq!(summary.total_errors, 0);
        assert!(!summary.aborted);
        assert_eq!(summary.outcomes[1].disposition, BatchDisposition::Conflict);
        assert!(summary.outcomes[1].error_detail.is_some());
    }

    #[tokio::test]
    async fn test_unauthorized_aborts_remaining_batches() {
        let server = MockServer::start().await;
        mount_statuses(&server, &[401]).await;
        let file = write_products_file(&ProductFactory::many(1250));

        let summary = import_products(&import_config(&server, &file), &run())
            .await
            .unwrap()
            .summary
            .unwrap();

        assert_eq!(server.received_requests().await.unwrap().len(), 1);
        assert!(summary.aborted);
        assert_eq!(summary.total_inserted, 0);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_attempted, 500);
        assert_eq!(summary.outcomes.len(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_after_progress_keeps_earlier_inserts() {
        let server = MockServer::start().await;
        mount_statuses(&server, &[201, 401]).await;
        let file = write_products_file(&ProductFactory::many(1250));

        let summary = import_products(&import_config(&server, &file), &run())
            .await
            .unwrap()
            .summary
            .unwrap();

        assert_eq!(batch_sizes(&server).await, vec![500, 500]);
        assert_eq!(summary.total_inserted, 500);
        assert!(summary.aborted);
    }

    #[tokio::test]
    async fn test_server_errors_are_counted_and_skipped() {
        let server = MockServer::start().await;
        mount_statuses(&server, &[500, 201, 503]).await;
        let file = write_products_file(&ProductFactory::many(1250));

        let summary = import_products(&import_config(&server, &file), &run())
            .await
            .unwrap()
            .summary
            .unwrap();

        assert_eq!(batch_sizes(&server).await.len(), 3);
        assert_eq!(summary.total_inserted, 500);
        assert_eq!(summary.total_errors, 2);
        assert_eq!(summary.outcomes[2].http_status, Some(503));
        assert!(!summary.is_clean());
    }

    #[tokio::test]
    async fn test_any_success_status_counts_as_inserted() {
        let server = MockServer::start().await;
        mount_statuses(&server, &[200, 204]).await;
        let file = write_products_file(&ProductFactory::many(4));

        let mut config = import_config(&server, &file);
        config.import.batch_size = 2;
        let summary = import_products(&config, &run()).await.unwrap().summary.unwrap();

        assert_eq!(summary.total_inserted, 4);
        assert!(summary.is_clean());
    }

    #[tokio::test]
    async fn test_connection_failure_counts_every_batch() {
        let file = write_products_file(&ProductFactory::many(3));
        let mut config = test_config("http://127.0.0.1:1");
        config.import.json_file = file.path().to_path_buf();
        config.import.batch_size = 1;

        let summary = import_products(&config, &run()).await.unwrap().summary.unwrap();

        assert_eq!(summary.total_errors, 3);
        assert_eq!(summary.total_inserted, 0);
        assert!(summary.outcomes.iter().all(|o| {
            o.disposition == BatchDisposition::TransportError && o.http_status.is_none()
        }));
    }

    #[tokio::test]
    async fn test_dry_run_sends_nothing_and_needs_no_credentials() {
        let server = MockServer::start().await;
        let mut records = ProductFactory::for_supplier(SUPPLIER_BINDI, 3);
        records.extend(ProductFactory::for_supplier(SUPPLIER_MARR, 2));
        let file = write_products_file(&records);

        let mut config = import_config(&server, &file);
        config.remote.service_key = None;
        config.suppliers = SupplierDirectory::new().with_supplier("Bindi", SUPPLIER_BINDI);

        let report = import_products(&config, &ImportOptions { dry_run: true })
            .await
            .unwrap();

        assert!(report.summary.is_none());
        assert_eq!(report.total_records, 5);
        assert_eq!(
            report.breakdown,
            vec![("Bindi".to_string(), 3), (SUPPLIER_MARR.to_string(), 2)]
        );
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rows_without_code_or_description_are_not_sent() {
        let server = MockServer::start().await;
        mount_statuses(&server, &[201]).await;
        let mut records = ProductFactory::many(3);
        records[1].supplier_code = "  ".to_string();
        records[2].description = String::new();
        let file = write_products_file(&records);

        let report = import_products(&import_config(&server, &file), &run())
            .await
            .unwrap();

        assert_eq!(report.total_records, 1);
        assert_eq!(batch_sizes(&server).await, vec![1]);
    }

    #[tokio::test]
    async fn test_empty_file_sends_nothing() {
        let server = MockServer::start().await;
        mount_statuses(&server, &[201]).await;
        let file = write_products_file(&[]);

        let summary = import_products(&import_config(&server, &file), &run())
            .await
            .unwrap()
            .summary
            .unwrap();

        assert_eq!(summary.total_batches, 0);
        assert_eq!(summary.total_inserted, 0);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_service_key_fails_before_any_request() {
        let server = MockServer::start().await;
        let file = write_products_file(&ProductFactory::many(3));
        let mut config = import_config(&server, &file);
        config.remote.service_key = None;

        let result = import_products(&config, &run()).await;

        assert!(matches!(result, Err(IngestError::Config(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_input_file_is_not_found() {
        let server = MockServer::start().await;
        let mut config = test_config(&server.uri());
        config.import.json_file = Path::new("no_such_products_file.json").to_path_buf();

        let result = import_products(&config, &run()).await;
        assert!(matches!(result, Err(IngestError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_batch_size_is_a_config_error() {
        let server = MockServer::start().await;
        let file = write_products_file(&ProductFactory::many(3));
        let mut config = import_config(&server, &file);
        config.import.batch_size = 0;

        let result = import_products(&config, &run()).await;
        assert!(matches!(result, Err(IngestError::Config(_))));
    }
}
