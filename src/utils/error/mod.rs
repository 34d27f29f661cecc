//! Error handling utilities
//!
//! A single error type covers configuration problems, transport failures and
//! HTTP status classes reported by the remote store.

mod conversions;
mod helpers;
mod types;


pub use types::{IngestError, Result};
