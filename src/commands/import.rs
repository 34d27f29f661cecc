//! `import` subcommand

use tracing::{info, warn};

use super::http_client;
use crate::config::Config;
use crate::core::batch::{BulkLoader, LoadSummary, ProductTableClient};
use crate::core::source::{load_products, resolve_input_path, supplier_breakdown};
use crate::utils::error::Result;

/// Options for an import run
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Parse and summarize only; no requests are sent
    pub dry_run: bool,
}

/// What an import run saw and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Importable rows read from the input file
    pub total_records: usize,
    /// Row counts per supplier label, largest first
    pub breakdown: Vec<(String, usize)>,
    /// `None` for dry runs
    pub summary: Option<LoadSummary>,
}

/// Load the product file and bulk insert it into the products table
pub async fn import_products(config: &Config, options: &ImportOptions) -> Result<ImportReport> {
    config.validate()?;

    // Credentials are checked before reading the input so a misconfigured
    // run fails fast; dry runs need none.
    let target = if options.dry_run {
        None
    } else {
        Some((config.products_url()?, config.require_service_key()?))
    };

    let path = resolve_input_path(&config.import.json_file)?;
    let products = load_products(&path).await?;
    let breakdown = supplier_breakdown(&products, &config.suppliers);

    info!(total = products.len(), "Total products to import");
    for (label, count) in &breakdown {
        info!("  {}: {}", label, count);
    }

    let Some((url, service_key)) = target else {
        info!("[DRY RUN] No data inserted");
        return Ok(ImportReport {
            total_records: products.len(),
            breakdown,
            summary: None,
        });
    };

    let table = ProductTableClient::new(
        http_client(config)?,
        url,
        service_key.expose(),
        config.import.request_timeout(),
    );
    info!(
        endpoint = table.url(),
        batch_size = config.import.batch_size,
        "Inserting products"
    );

    let summary = BulkLoader::new(table, config.import.loader_config())
        .insert_all(&products)
        .await?;

    if summary.aborted {
        warn!("Import aborted: check {}", crate::config::ENV_SERVICE_KEY);
    }
    if summary.conflicts > 0 {
        warn!(
            conflicts = summary.conflicts,
            "Some batches hit duplicate keys; products may already be imported"
        );
    }
    info!(
        "Done! Inserted {}/{} products",
        summary.total_inserted,
        products.len()
    );

    Ok(ImportReport {
        total_records: products.len(),
        breakdown,
        summary: Some(summary),
    })
}
