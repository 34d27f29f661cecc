//! # catalog-ingest
//!
//! Batch ingestion for a hosted product catalog.
//!
//! Two independent pipelines, each issuing one request at a time:
//!
//! - **Embedding backfill** ([`core::embeddings`]): calls a remote function
//!   that embeds one page of products per call, until the server reports no
//!   remaining rows or stops making progress. Timeouts are retried; any other
//!   failure ends the run.
//! - **Bulk import** ([`core::batch`]): splits product rows into fixed-size
//!   batches and inserts each one through the REST gateway. Duplicate-key and
//!   server errors skip the batch; a rejected key aborts the run.
//!
//! ```rust,no_run
//! use catalog_ingest::{Config, commands};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     let report = commands::generate_embeddings(&config).await?;
//!     println!("embedded {} products", report.total_processed);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{IngestError, Result};

pub use core::batch::{BulkLoader, LoadSummary, LoaderConfig};
pub use core::embeddings::{CompletionLoop, CompletionLoopConfig, CompletionReport, StopReason};
pub use core::models::{ProductRecord, WorkCallResult};
