//! Configuration management for the ingestion tools
//!
//! Defaults are overlaid by an optional YAML file, then by environment
//! variables, then by command-line flags. Credentials only ever come from the
//! environment and there is no fallback value for any of them.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{
    DEFAULT_CONFIG_PATH, ENV_BASE_URL, ENV_BATCH_SIZE, ENV_OPENAI_API_KEY, ENV_PAGE_SIZE,
    ENV_SERVICE_KEY,
};
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub embeddings: EmbeddingsConfig,
    pub import: ImportConfig,
    /// Supplier display names keyed to their catalog ids
    pub suppliers: SupplierDirectory,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            IngestError::config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Config = serde_yaml::from_str(&content)?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Resolve the full configuration for a run
    ///
    /// An explicit `path` must exist. Without one, `config/ingest.yaml` is used
    /// when present. Environment overrides are applied on top either way.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH).await?
            }
            None => {
                debug!("No configuration file, using defaults");
                Self::default()
            }
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.remote
            .validate()
            .map_err(|e| IngestError::config(format!("Remote config error: {}", e)))?;
        self.embeddings
            .validate()
            .map_err(|e| IngestError::config(format!("Embeddings config error: {}", e)))?;
        self.import
            .validate()
            .map_err(|e| IngestError::config(format!("Import config error: {}", e)))?;
        self.suppliers
            .validate()
            .map_err(|e| IngestError::config(format!("Supplier config error: {}", e)))?;

        Ok(())
    }

    pub fn require_base_url(&self) -> Result<&str> {
        self.remote
            .base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| IngestError::config(format!("{} is not set", ENV_BASE_URL)))
    }

    pub fn require_service_key(&self) -> Result<&SecretString> {
        self.remote.service_key.as_ref().ok_or_else(|| {
            IngestError::config(format!(
                "{} is not set (use the project's service_role key, not the anon key)",
                ENV_SERVICE_KEY
            ))
        })
    }

    pub fn require_openai_key(&self) -> Result<&SecretString> {
        self.embeddings
            .openai_api_key
            .as_ref()
            .ok_or_else(|| IngestError::config(format!("{} is not set", ENV_OPENAI_API_KEY)))
    }

    /// Full URL of the embedding generation function
    pub fn embeddings_url(&self) -> Result<String> {
        self.require_base_url()?;
        self.remote
            .endpoint_url(&self.remote.embeddings_path)
            .ok_or_else(|| IngestError::config(format!("{} is not set", ENV_BASE_URL)))
    }

    /// Full URL of the products table
    pub fn products_url(&self) -> Result<String> {
        self.require_base_url()?;
        self.remote
            .endpoint_url(&self.remote.products_path)
            .ok_or_else(|| IngestError::config(format!("{} is not set", ENV_BASE_URL)))
    }

    /// Convert to YAML string; credentials are never included
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| IngestError::config(format!("Failed to serialize config: {}", e)))
    }
}
