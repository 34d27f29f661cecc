//! Environment overrides

use super::Config;
use super::models::SecretString;
use crate::utils::error::{IngestError, Result};
use std::env;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config/ingest.yaml";

pub const ENV_BASE_URL: &str = "SUPABASE_URL";
pub const ENV_SERVICE_KEY: &str = "SUPABASE_SERVICE_KEY";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_PAGE_SIZE: &str = "INGEST_PAGE_SIZE";
pub const ENV_BATCH_SIZE: &str = "INGEST_BATCH_SIZE";

impl Config {
    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    ///
    /// Blank values are treated as unset.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_BASE_URL) {
            self.remote.base_url = Some(url);
        }
        if let Some(key) = get(ENV_SERVICE_KEY) {
            self.remote.service_key = SecretString::new(key);
        }
        if let Some(key) = get(ENV_OPENAI_API_KEY) {
            self.embeddings.openai_api_key = SecretString::new(key);
        }
        if let Some(value) = get(ENV_PAGE_SIZE) {
            self.embeddings.page_size = parse_var(ENV_PAGE_SIZE, &value)?;
        }
        if let Some(value) = get(ENV_BATCH_SIZE) {
            self.import.batch_size = parse_var(ENV_BATCH_SIZE, &value)?;
        }

        debug!("Environment overrides applied");
        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| IngestError::config(format!("Invalid {}: {}", key, e)))
}
