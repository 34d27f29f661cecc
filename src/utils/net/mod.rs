//! Network and client utilities
//!
//! This module provides HTTP client construction and response capture.

pub mod http;

// Re-export commonly used types and functions
pub use http::{HttpClientConfig, HttpReply, create_client, send_json};
