//! Product input file
//!
//! The importer reads a JSON array of product rows prepared ahead of time.
//! Rows without a supplier code or description are dropped here so they
//! never reach the loader.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::SupplierDirectory;
use crate::core::models::ProductRecord;
use crate::utils::error::{IngestError, Result};

/// Directory searched when the input path does not exist as given
pub const FALLBACK_DATA_DIR: &str = "data";

/// Locate the input file, trying `data/<path>` when `path` does not exist
pub fn resolve_input_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    if path.is_relative() {
        let alternative = Path::new(FALLBACK_DATA_DIR).join(path);
        if alternative.exists() {
            return Ok(alternative);
        }
    }

    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());
    Err(IngestError::not_found(format!(
        "JSON file not found: {} (current directory: {}; place it in the working directory or {}/)",
        path.display(),
        cwd,
        FALLBACK_DATA_DIR
    )))
}

/// Read product rows from a JSON array, dropping rows that cannot be imported
pub async fn load_products(path: &Path) -> Result<Vec<ProductRecord>> {
    info!("Loading products from {}", path.display());

    let content = tokio::fs::read_to_string(path).await?;
    let raw: Vec<ProductRecord> = serde_json::from_str(&content)?;
    let loaded = raw.len();

    let products = filter_importable(raw);
    let dropped = loaded - products.len();
    if dropped > 0 {
        warn!(dropped, "Skipped rows without a supplier code or description");
    }

    info!(count = products.len(), "Loaded products");
    Ok(products)
}

/// Keep importable rows, trimmed, in their original order
pub fn filter_importable(records: Vec<ProductRecord>) -> Vec<ProductRecord> {
    records
        .into_iter()
        .filter(ProductRecord::is_importable)
        .map(ProductRecord::normalize)
        .collect()
}

/// Per-supplier row counts, largest first
///
/// Suppliers missing from the directory are labelled by their id.
pub fn supplier_breakdown(
    records: &[ProductRecord],
    directory: &SupplierDirectory,
) -> Vec<(String, usize)> {
    let mut counts: HashMap<Uuid, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.supplier_id).or_default() += 1;
    }

    let mut breakdown: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(id, count)| (directory.label_for(&id), count))
        .collect();
    breakdown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    breakdown
}
