//! Batch outcome and run summary types

use crate::utils::error::IngestError;

/// How the store answered one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchDisposition {
    /// 2xx: every row in the batch was stored
    Inserted,
    /// 409: duplicate key, batch skipped
    Conflict,
    /// 401: credentials rejected, run aborted
    Unauthorized,
    /// Any other status
    Failed,
    /// No response (connection failure, timeout)
    TransportError,
}

impl BatchDisposition {
    /// Classify a batch that was not stored
    pub fn from_error(err: &IngestError) -> Self {
        match err {
            IngestError::Auth(_) => Self::Unauthorized,
            IngestError::Conflict(_) => Self::Conflict,
            err if err.is_transient() => Self::TransportError,
            _ => Self::Failed,
        }
    }

    /// Counted in the run's error total
    pub fn is_error(self) -> bool {
        matches!(self, Self::Unauthorized | Self::Failed | Self::TransportError)
    }
}

/// Result of submitting one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSubmissionOutcome {
    /// 1-based position of the batch
    pub batch_index: usize,
    pub batch_len: usize,
    /// Rows stored; either `batch_len` or 0
    pub accepted_count: usize,
    /// `None` when no response was received
    pub http_status: Option<u16>,
    pub error_detail: Option<String>,
    pub disposition: BatchDisposition,
}

impl BatchSubmissionOutcome {
    pub fn inserted(batch_index: usize, batch_len: usize, status: u16) -> Self {
        Self {
            batch_index,
            batch_len,
            accepted_count: batch_len,
            http_status: Some(status),
            error_detail: None,
            disposition: BatchDisposition::Inserted,
        }
    }

    /// Outcome of a batch the store did not accept, or never answered
    pub fn rejected(
        batch_index: usize,
        batch_len: usize,
        err: &IngestError,
        detail: String,
    ) -> Self {
        Self {
            batch_index,
            batch_len,
            accepted_count: 0,
            http_status: err.status_code(),
            error_detail: Some(detail),
            disposition: BatchDisposition::from_error(err),
        }
    }
}

/// Counts accumulated over a bulk import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records handed to the loader
    pub total_records: usize,
    /// Batches the records were split into
    pub total_batches: usize,
    /// Records in batches that were actually submitted
    pub total_attempted: usize,
    pub total_inserted: usize,
    /// Batches that failed, excluding conflicts
    pub total_errors: usize,
    /// Batches skipped on a duplicate key
    pub conflicts: usize,
    /// Run stopped early on an authentication failure
    pub aborted: bool,
    pub outcomes: Vec<BatchSubmissionOutcome>,
}

impl LoadSummary {
    pub fn new(total_records: usize, total_batches: usize) -> Self {
        Self {
            total_records,
            total_batches,
            ..Default::default()
        }
    }

    /// Fold one batch outcome into the totals
    pub fn record(&mut self, outcome: BatchSubmissionOutcome) {
        self.total_attempted += outcome.batch_len;
        self.total_inserted += outcome.accepted_count;
        if outcome.disposition.is_error() {
            self.total_errors += 1;
        }
        if outcome.disposition == BatchDisposition::Conflict {
            self.conflicts += 1;
        }
        if outcome.disposition == BatchDisposition::Unauthorized {
            self.aborted = true;
        }
        self.outcomes.push(outcome);
    }

    /// Integer percentage of all records inserted so far
    pub fn percent_inserted(&self) -> usize {
        if self.total_records == 0 {
            100
        } else {
            self.total_inserted * 100 / self.total_records
        }
    }

    /// Every batch was stored
    pub fn is_clean(&self) -> bool {
        !self.aborted && self.total_errors == 0 && self.conflicts == 0
    }
}
