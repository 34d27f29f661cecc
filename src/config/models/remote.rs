//! Remote project configuration

use super::secret::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the hosted project lives and how to reach it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Project base URL, e.g. `https://<ref>.supabase.co`
    pub base_url: Option<String>,
    /// Service role key; environment only
    #[serde(skip)]
    pub service_key: Option<SecretString>,
    /// Path of the embedding generation function
    pub embeddings_path: String,
    /// Path of the products table on the REST gateway
    pub products_path: String,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            service_key: None,
            embeddings_path: "/functions/v1/generate-embeddings".to_string(),
            products_path: "/rest/v1/products".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl RemoteConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Join the base URL and an endpoint path
    pub fn endpoint_url(&self, path: &str) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), path))
    }
}
