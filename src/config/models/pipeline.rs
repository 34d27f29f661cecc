//! Pipeline tuning

use super::secret::SecretString;
use crate::core::batch::LoaderConfig;
use crate::core::embeddings::CompletionLoopConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Embedding backfill settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingsConfig {
    /// Embedding provider key forwarded to the function; environment only
    #[serde(skip)]
    pub openai_api_key: Option<SecretString>,
    pub page_size: u32,
    /// Per-request timeout; server-side embedding of a page is slow
    pub request_timeout_secs: u64,
    pub pause_ms: u64,
    pub timeout_pause_ms: u64,
    pub max_consecutive_timeouts: Option<u32>,
    pub max_iterations: Option<u32>,
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            page_size: 100,
            request_timeout_secs: 120,
            pause_ms: 1000,
            timeout_pause_ms: 5000,
            max_consecutive_timeouts: Some(10),
            max_iterations: None,
        }
    }
}

impl EmbeddingsConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn loop_config(&self) -> CompletionLoopConfig {
        CompletionLoopConfig::new()
            .with_page_size(self.page_size)
            .with_pauses(
                Duration::from_millis(self.pause_ms),
                Duration::from_millis(self.timeout_pause_ms),
            )
            .with_max_consecutive_timeouts(self.max_consecutive_timeouts)
            .with_max_iterations(self.max_iterations)
    }
}

/// Bulk product import settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// JSON array of product rows
    pub json_file: PathBuf,
    pub batch_size: usize,
    pub request_timeout_secs: u64,
    pub pause_ms: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            json_file: PathBuf::from("all_products.json"),
            batch_size: 500,
            request_timeout_secs: 30,
            pause_ms: 100,
        }
    }
}

impl ImportConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig::new()
            .with_batch_size(self.batch_size)
            .with_pause(Duration::from_millis(self.pause_ms))
    }
}
