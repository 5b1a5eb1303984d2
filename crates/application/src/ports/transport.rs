//! Transport port

use std::future::Future;

use probe_domain::{OutgoingRequest, ResponseHead};
use thiserror::Error;

use super::BodyStream;

/// Errors a transport can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The URL could not be parsed by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A configured timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be read.
    #[error("failed to read body: {0}")]
    BodyRead(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// A response as delivered by the transport.
///
/// Redirects are never followed, so a 3xx response arrives here as-is.
#[derive(Debug)]
pub struct ReceivedResponse {
    /// Status and headers.
    pub head: ResponseHead,
    /// Single-read body.
    pub body: BodyStream,
}

/// Port for sending HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// the application layer to be independent of specific HTTP libraries.
/// Implementations must not follow redirects.
pub trait Transport: Send + Sync {
    /// Sends a request and returns the response head with an unread body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be completed, for example
    /// because the connection was refused or the host did not resolve.
    fn send(
        &self,
        request: &OutgoingRequest,
    ) -> impl Future<Output = Result<ReceivedResponse, TransportError>> + Send;
}
