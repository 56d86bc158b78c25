//! Error types for the websift-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. No API keys appear in error messages.
//!
//! "No eligible link" is not an error: it is the empty string
//! [`crate::types::NOT_FOUND`].

/// Errors that can occur while talking to a search provider.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The request could not be sent or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The provider answered with a non-success status code.
    #[error("HTTP status {status}: {body}")]
    HttpStatus {
        /// Numeric status code returned by the provider.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// The provider redirected, refused, or throttled a scraping request.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// A scraping request timed out. Callers may retry.
    #[error("retrieval timed out: {0}")]
    Timeout(String),

    /// Malformed JSON, or a missing field, token, or marker.
    #[error("parse error: {0}")]
    Parse(String),

    /// The provider does not support the requested operation.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Invalid provider configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Whether re-invoking the failed operation might succeed.
    ///
    /// Only timeouts are considered retryable; rate limiting and malformed
    /// responses are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Convenience type alias for websift-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_transport() {
        let err = SearchError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "transport error: connection refused");
    }

    #[test]
    fn display_http_status() {
        let err = SearchError::HttpStatus {
            status: 401,
            body: "invalid key".into(),
        };
        assert_eq!(err.to_string(), "HTTP status 401: invalid key");
    }

    #[test]
    fn display_rate_limited() {
        let err = SearchError::RateLimited("status 403".into());
        assert_eq!(err.to_string(), "rate limited: status 403");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("DuckDuckGo".into());
        assert_eq!(err.to_string(), "retrieval timed out: DuckDuckGo");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("vqd token not found".into());
        assert_eq!(err.to_string(), "parse error: vqd token not found");
    }

    #[test]
    fn display_unsupported() {
        let err = SearchError::Unsupported("use inference instead".into());
        assert_eq!(
            err.to_string(),
            "unsupported operation: use inference instead"
        );
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("timeout_seconds must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: timeout_seconds must be greater than 0"
        );
    }

    #[test]
    fn only_timeout_is_retryable() {
        assert!(SearchError::Timeout("x".into()).is_retryable());
        assert!(!SearchError::RateLimited("x".into()).is_retryable());
        assert!(!SearchError::Parse("x".into()).is_retryable());
        assert!(!SearchError::Transport("x".into()).is_retryable());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
