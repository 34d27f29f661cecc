//! Embedding function request and response bodies

use serde::{Deserialize, Serialize};

/// Body sent to the embedding generation function
#[derive(Debug, Clone, Serialize)]
pub struct ProcessRequest<'a> {
    /// Credential the function uses to reach the embedding provider
    #[serde(rename = "openai_api_key")]
    pub credential: &'a str,
    /// Maximum number of rows to process in this call
    pub limit: u32,
}

/// Result of one call to the embedding generation function
///
/// `processed` and `remaining` are reported independently by the server;
/// `remaining` is not guaranteed to shrink by exactly `processed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkCallResult {
    #[serde(default)]
    pub processed: u64,
    #[serde(default)]
    pub remaining: u64,
    /// Per-item failures inside an otherwise successful call
    #[serde(default)]
    pub errors: Vec<String>,
}

impl WorkCallResult {
    pub fn new(processed: u64, remaining: u64) -> Self {
        Self {
            processed,
            remaining,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    /// True once the server has nothing left or could not make progress
    pub fn is_final(&self) -> bool {
        self.remaining == 0 || self.processed == 0
    }
}
