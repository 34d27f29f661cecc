//! Helper functions for creating and inspecting errors

use super::types::IngestError;

impl IngestError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    /// Map a non-success HTTP status onto the error taxonomy
    pub fn from_status<S: Into<String>>(status: u16, body: S) -> Self {
        let body = body.into();
        match status {
            401 => Self::Auth(body),
            409 => Self::Conflict(body),
            _ => Self::Http { status, body },
        }
    }

    /// Transport hiccups that may succeed when attempted again
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Network(_))
    }

    /// HTTP status carried by the error, if it came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth(_) => Some(401),
            Self::Conflict(_) => Some(409),
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
