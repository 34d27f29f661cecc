//! Ingestion pipelines
//!
//! - **embeddings**: completion loop over the remote embedding function
//! - **batch**: chunked bulk insert of product rows
//! - **source**: JSON product input
//! - **models**: rows and wire bodies shared by the pipelines

pub mod batch;
pub mod embeddings;
pub mod models;
pub mod source;
