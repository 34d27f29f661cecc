//! Utility modules shared by both pipelines
//!
//! - **error**: the crate error type and its classification helpers
//! - **logging**: tracing subscriber setup
//! - **net**: HTTP client construction and response capture

pub mod error; // Error handling
pub mod logging; // Logging setup
pub mod net; // Network & client utilities

pub use error::{IngestError, Result};
pub use net::{HttpClientConfig, HttpReply};

use regex::Regex;
use std::sync::OnceLock;

/// Format duration as human readable string
pub fn format_duration(duration_ms: u64) -> String {
    if duration_ms < 1000 {
        format!("{}ms", duration_ms)
    } else if duration_ms < 60_000 {
        format!("{:.1}s", duration_ms as f64 / 1000.0)
    } else if duration_ms < 3_600_000 {
        format!("{:.1}m", duration_ms as f64 / 60_000.0)
    } else {
        format!("{:.1}h", duration_ms as f64 / 3_600_000.0)
    }
}

fn redaction_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (
                r#"(?i)api[_-]?key["']?\s*[:=]\s*["']?([a-zA-Z0-9\-_]{20,})"#,
                "api_key: [REDACTED]",
            ),
            (
                r#"(?i)token["']?\s*[:=]\s*["']?([a-zA-Z0-9\-_\.]{20,})"#,
                "token: [REDACTED]",
            ),
            (r#"(?i)bearer\s+[a-zA-Z0-9\-_\.]{20,}"#, "Bearer [REDACTED]"),
            (r#"sk-[a-zA-Z0-9\-_]{16,}"#, "sk-[REDACTED]"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| {
            Regex::new(pattern).ok().map(|re| (re, replacement))
        })
        .collect()
    })
}

/// Sanitize string for logging (remove keys and tokens echoed back by a server)
pub fn sanitize_for_logging(input: &str) -> String {
    let mut result = input.to_string();
    for (re, replacement) in redaction_patterns() {
        result = re.replace_all(&result, *replacement).to_string();
    }
    result
}

/// Truncate string to at most `max_chars` characters, respecting char boundaries
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((byte_idx, _)) => format!("{}...", &s[..byte_idx]),
    }
}

/// Response body prepared for a log line: sanitized, then truncated
pub fn body_excerpt(body: &str, max_chars: usize) -> String {
    truncate_string(&sanitize_for_logging(body), max_chars)
}

/// Check if a string is a valid http(s) URL
pub fn is_valid_url(url: &str) -> bool {
    url::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
