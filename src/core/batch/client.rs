//! Bulk insert endpoint

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::core::models::ProductRecord;
use crate::utils::error::Result;
use crate::utils::net::{HttpReply, send_json};

/// Remote table accepting a JSON array of rows per request
///
/// Implementations return every HTTP response as `Ok`; only transport
/// failures are `Err`.
#[async_trait]
pub trait BulkInsertEndpoint: Send + Sync {
    async fn insert_batch(&self, batch: &[ProductRecord]) -> Result<HttpReply>;
}

#[async_trait]
impl<T: BulkInsertEndpoint + ?Sized> BulkInsertEndpoint for &T {
    async fn insert_batch(&self, batch: &[ProductRecord]) -> Result<HttpReply> {
        (**self).insert_batch(batch).await
    }
}

/// PostgREST `products` table behind the project's REST gateway
pub struct ProductTableClient {
    client: Client,
    url: String,
    service_key: String,
    timeout: Duration,
}

impl ProductTableClient {
    pub fn new<U: Into<String>, K: Into<String>>(
        client: Client,
        url: U,
        service_key: K,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            service_key: service_key.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl BulkInsertEndpoint for ProductTableClient {
    async fn insert_batch(&self, batch: &[ProductRecord]) -> Result<HttpReply> {
        let request = self
            .client
            .post(&self.url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            // The loader only looks at the status code
            .header("Prefer", "return=minimal")
            .json(batch);

        send_json(request, self.timeout).await
    }
}
