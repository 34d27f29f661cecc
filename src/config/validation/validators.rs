//! Validators for each configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use crate::utils::is_valid_url;
use tracing::{debug, warn};

impl Validate for RemoteConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating remote configuration");

        if let Some(url) = &self.base_url {
            if !is_valid_url(url) {
                return Err(format!("base URL is not a valid http(s) URL: {}", url));
            }
        }
        for (name, path) in [
            ("embeddings_path", &self.embeddings_path),
            ("products_path", &self.products_path),
        ] {
            if !path.starts_with('/') {
                return Err(format!("{} must start with '/': {}", name, path));
            }
        }
        if self.connect_timeout_secs == 0 {
            return Err("connect timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for EmbeddingsConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating embeddings configuration");

        if self.page_size == 0 {
            return Err("page size must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request timeout must be greater than 0".to_string());
        }
        if self.max_consecutive_timeouts == Some(0) {
            return Err("max_consecutive_timeouts must be greater than 0 when set".to_string());
        }
        if self.max_iterations == Some(0) {
            return Err("max_iterations must be greater than 0 when set".to_string());
        }
        if self.request_timeout_secs < 120 {
            warn!(
                timeout_secs = self.request_timeout_secs,
                "Embedding requests may time out before the server finishes a page"
            );
        }

        Ok(())
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating import configuration");

        if self.batch_size == 0 {
            return Err("batch size must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request timeout must be greater than 0".to_string());
        }
        if self.json_file.as_os_str().is_empty() {
            return Err("json_file cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for SupplierDirectory {
    fn validate(&self) -> Result<(), String> {
        let duplicates = self.duplicate_ids();
        if !duplicates.is_empty() {
            return Err(format!(
                "supplier ids mapped from more than one name: {:?}",
                duplicates
            ));
        }
        Ok(())
    }
}
