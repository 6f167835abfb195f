//! Error types for the zekat application.

use zekat_search::SearchError;

/// Top-level error type for the search application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Search history persistence error.
    #[error("history error: {0}")]
    History(String),

    /// Error from the search client.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel send/receive error.
    #[error("channel error: {0}")]
    Channel(String),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
