//! HTTP client for the ingestion pipelines
//!
//! Both pipelines issue one request at a time, so a single pooled client per
//! run is enough. Request timeouts differ per endpoint (long for the
//! embedding function, short for bulk inserts) and are applied per request,
//! leaving only connection-level settings on the client.

use crate::utils::error::{IngestError, Result};
use reqwest::{Client, ClientBuilder, RequestBuilder};
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Idle connection timeout
    pub pool_idle_timeout: Duration,
    /// TCP keepalive interval
    pub tcp_keepalive: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Duration::from_secs(60),
            user_agent: format!("catalog-ingest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Set the connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Create an HTTP client with the given settings
pub fn create_client(config: &HttpClientConfig) -> Result<Client> {
    debug!(
        connect_timeout_ms = config.connect_timeout.as_millis() as u64,
        "Creating HTTP client"
    );

    ClientBuilder::new()
        .pool_idle_timeout(config.pool_idle_timeout)
        .connect_timeout(config.connect_timeout)
        .tcp_keepalive(config.tcp_keepalive)
        .tcp_nodelay(true)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| IngestError::config(format!("Failed to create HTTP client: {}", e)))
}

/// Status and body of a response, captured before any classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new<S: Into<String>>(status: u16, body: S) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Read the status and body of a response
    pub async fn from_response(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(Self { status, body })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx reply into the matching [`IngestError`]
    ///
    /// 401 becomes `Auth`, 409 `Conflict`, anything else `Http`.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(IngestError::from_status(self.status, self.body))
        }
    }

    /// Deserialize the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            IngestError::parsing(format!("Unexpected response body (HTTP {}): {}", self.status, e))
        })
    }
}

/// Send a prepared request with a request-scoped timeout and capture the reply
///
/// Any status code is returned as `Ok`; only transport failures are errors
/// (`IngestError::Timeout` or `IngestError::Network`). Callers classify the
/// status with [`HttpReply::error_for_status`].
pub async fn send_json(request: RequestBuilder, timeout: Duration) -> Result<HttpReply> {
    let response = request.timeout(timeout).send().await?;
    HttpReply::from_response(response).await
}
