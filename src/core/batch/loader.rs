//! Sequential bulk loader

use std::time::Duration;
use tracing::{error, info, warn};

use super::client::BulkInsertEndpoint;
use super::partition::{batch_count, partition};
use super::types::{BatchDisposition, BatchSubmissionOutcome, LoadSummary};
use crate::core::models::ProductRecord;
use crate::utils::body_excerpt;
use crate::utils::error::Result;
use crate::utils::net::HttpReply;

const BODY_EXCERPT_CHARS: usize = 200;

/// Settings for the bulk loader
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Rows per request (default: 500)
    pub batch_size: usize,
    /// Pause after each batch (default: 100ms)
    pub pause: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 500,
            pause: Duration::from_millis(100),
        }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero is rejected by [`BulkLoader::insert_all`]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }
}

/// Submits records to a [`BulkInsertEndpoint`] in fixed-size batches
pub struct BulkLoader<E> {
    endpoint: E,
    config: LoaderConfig,
}

impl<E: BulkInsertEndpoint> BulkLoader<E> {
    pub fn new(endpoint: E, config: LoaderConfig) -> Self {
        Self { endpoint, config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Insert every record, one batch at a time, in input order
    ///
    /// Conflicting, failed and unreachable batches are skipped and counted.
    /// A 401 aborts the run; the summary then covers the batches submitted up
    /// to and including the rejected one. Only a zero batch size is `Err`.
    pub async fn insert_all(&self, records: &[ProductRecord]) -> Result<LoadSummary> {
        let batches = partition(records, self.config.batch_size)?;
        let mut summary = LoadSummary::new(
            records.len(),
            batch_count(records.len(), self.config.batch_size),
        );

        for (i, batch) in batches.enumerate() {
            let batch_index = i + 1;
            let result = self
                .endpoint
                .insert_batch(batch)
                .await
                .and_then(HttpReply::error_for_status);
            let outcome = match result {
                Ok(reply) => {
                    BatchSubmissionOutcome::inserted(batch_index, batch.len(), reply.status)
                }
                Err(e) => BatchSubmissionOutcome::rejected(
                    batch_index,
                    batch.len(),
                    &e,
                    body_excerpt(&e.to_string(), BODY_EXCERPT_CHARS),
                ),
            };

            let disposition = outcome.disposition;
            summary.record(outcome);
            self.log_outcome(&summary);

            if disposition == BatchDisposition::Unauthorized {
                error!(
                    inserted = summary.total_inserted,
                    "Aborting import: the service key was rejected"
                );
                return Ok(summary);
            }

            tokio::time::sleep(self.config.pause).await;
        }

        if summary.total_errors > 0 {
            warn!(
                errors = summary.total_errors,
                "Import completed with batch errors"
            );
        }
        info!(
            inserted = summary.total_inserted,
            attempted = summary.total_attempted,
            conflicts = summary.conflicts,
            errors = summary.total_errors,
            "Bulk import finished"
        );

        Ok(summary)
    }

    fn log_outcome(&self, summary: &LoadSummary) {
        let Some(outcome) = summary.outcomes.last() else {
            return;
        };
        let batch = outcome.batch_index;
        let batches = summary.total_batches;
        let detail = outcome.error_detail.as_deref().unwrap_or_default();

        match outcome.disposition {
            BatchDisposition::Inserted => info!(
                "Batch {}/{}: +{} rows ({}/{} = {}%)",
                batch,
                batches,
                outcome.accepted_count,
                summary.total_inserted,
                summary.total_records,
                summary.percent_inserted()
            ),
            BatchDisposition::Conflict => warn!(
                batch,
                "Duplicate key conflict; rows may already be imported: {}", detail
            ),
            BatchDisposition::Unauthorized => {
                error!(batch, status = 401, "Batch rejected: {}", detail)
            }
            BatchDisposition::Failed => error!(
                batch,
                status = outcome.http_status.unwrap_or_default(),
                "Batch failed: {}",
                detail
            ),
            BatchDisposition::TransportError => {
                error!(batch, "Batch request failed: {}", detail)
            }
        }
    }
}
