//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur while building a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Parameters could not be form-encoded.
    #[error("encoding failed: {0}")]
    Encoding(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
