//! Type conversions for IngestError

use super::types::IngestError;

// reqwest folds every transport failure into one type; split timeouts out so
// the completion loop can retry them. Statuses never arrive here: replies are
// captured whole and classified by `HttpReply::error_for_status`.
impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IngestError::Timeout(err.to_string())
        } else if err.is_decode() {
            IngestError::Parsing(err.to_string())
        } else {
            IngestError::Network(err.to_string())
        }
    }
}
