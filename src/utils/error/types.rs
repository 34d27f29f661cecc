//! Error types for the ingestion pipelines

use thiserror::Error;

/// Result type alias for the ingestion pipelines
pub type Result<T> = std::result::Result<T, IngestError>;

/// Main error type for the ingestion pipelines
#[derive(Error, Debug)]
pub enum IngestError {
    /// Configuration errors (missing credentials, bad values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input source could not be located
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid arguments handed to a pipeline
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication errors (HTTP 401)
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Conflict errors (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Request timed out
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Connection or other transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Any other non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body did not have the expected shape
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
