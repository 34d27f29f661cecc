//! Splitting an ordered record list into batches

use crate::utils::error::{IngestError, Result};

/// Number of batches needed for `total` items
pub fn batch_count(total: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        0
    } else {
        total.div_ceil(batch_size)
    }
}

/// Contiguous batches of at most `batch_size` items, in input order
///
/// Only the last batch may be shorter.
pub fn partition<T>(items: &[T], batch_size: usize) -> Result<std::slice::Chunks<'_, T>> {
    if batch_size == 0 {
        return Err(IngestError::validation("batch size must be at least 1"));
    }
    Ok(items.chunks(batch_size))
}
