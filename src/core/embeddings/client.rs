//! Embedding function endpoint

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::core::models::ProcessRequest;
use crate::utils::error::Result;
use crate::utils::net::{HttpReply, send_json};

/// Remote endpoint that processes one page of outstanding work per call
///
/// Implementations return every HTTP response as `Ok`, leaving status
/// classification to the caller; only transport failures are `Err`.
#[async_trait]
pub trait WorkEndpoint: Send + Sync {
    async fn process(&self, limit: u32) -> Result<HttpReply>;
}

#[async_trait]
impl<T: WorkEndpoint + ?Sized> WorkEndpoint for &T {
    async fn process(&self, limit: u32) -> Result<HttpReply> {
        (**self).process(limit).await
    }
}

/// `generate-embeddings` edge function reached over HTTP
pub struct EmbeddingFunctionClient {
    client: Client,
    url: String,
    credential: String,
    service_key: Option<String>,
    timeout: Duration,
}

impl EmbeddingFunctionClient {
    pub fn new<U: Into<String>, C: Into<String>>(
        client: Client,
        url: U,
        credential: C,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            credential: credential.into(),
            service_key: None,
            timeout,
        }
    }

    /// Send the project key as a bearer token for functions that verify JWTs
    pub fn with_service_key(mut self, key: Option<String>) -> Self {
        self.service_key = key;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl WorkEndpoint for EmbeddingFunctionClient {
    async fn process(&self, limit: u32) -> Result<HttpReply> {
        let body = ProcessRequest {
            credential: &self.credential,
            limit,
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.service_key {
            request = request.bearer_auth(key);
        }

        send_json(request, self.timeout).await
    }
}
