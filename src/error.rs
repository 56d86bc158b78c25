//! Error types for the websift host.

use websift_search::SearchError;

/// Top-level error type for configuration, bootstrap, and lookups.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be read, parsed, or written.
    #[error("config error: {0}")]
    Config(String),

    /// Logging could not be initialised.
    #[error("logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A search provider failed.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
