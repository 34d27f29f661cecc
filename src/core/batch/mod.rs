//! Chunked bulk import into the remote `products` table
//!
//! Records are split into contiguous batches and submitted one request at a
//! time. Each batch is classified on its own; only an authentication failure
//! stops the run.

mod client;
mod loader;
mod partition;
mod types;


pub use client::{BulkInsertEndpoint, ProductTableClient};
pub use loader::{BulkLoader, LoaderConfig};
pub use partition::{batch_count, partition};
pub use types::{BatchDisposition, BatchSubmissionOutcome, LoadSummary};
