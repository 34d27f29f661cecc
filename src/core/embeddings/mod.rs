//! Embedding backfill driven by a remote function
//!
//! The function embeds a bounded page of outstanding products per call. The
//! completion loop keeps calling it until the server reports nothing left or
//! stops making progress.

mod client;
mod runner;


pub use client::{EmbeddingFunctionClient, WorkEndpoint};
pub use runner::{CompletionLoop, CompletionLoopConfig, CompletionReport, StopReason};
