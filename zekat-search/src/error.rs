//! Error types for the zekat-search crate.
//!
//! Most remote failures never reach callers of [`crate::search`]: they are
//! absorbed by the demo fallback. These errors surface from configuration
//! validation and from the direct alternate-index probe.

/// Errors that can occur while talking to the research endpoints.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Transport-level failure (DNS, connect, body read).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status code.
    #[error("unexpected HTTP status: {0}")]
    Status(u16),

    /// A request exceeded its deadline.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Classify a [`reqwest::Error`] into a timeout or a generic transport error.
    pub(crate) fn from_reqwest(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }
}

/// Convenience type alias for zekat-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
