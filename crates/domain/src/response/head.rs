//! Response head type
//!
//! Status code and headers of a received response, plus resolution of the
//! `Location` header against the URL that was requested.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            100 => "Continue",
            101 => "Switching Protocols",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Why a response has no usable redirect target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The response carries no `Location` header.
    #[error("no Location header")]
    Missing,

    /// The header value (or the request URL) is not a valid URL reference.
    #[error("unresolvable Location '{location}': {reason}")]
    Unresolvable {
        /// Raw header value.
        location: String,
        /// Parser message.
        reason: String,
    },
}

/// Status and headers of a received response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseHead {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers in wire order.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl ResponseHead {
    /// Creates a new `ResponseHead`.
    #[must_use]
    pub const fn new(status: u16, headers: Vec<(String, String)>) -> Self {
        Self {
            status: StatusCode::new(status),
            headers,
        }
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Resolves the `Location` header against the URL that was requested.
    ///
    /// Relative references such as `/target` become absolute URLs on the
    /// request's origin.
    ///
    /// # Errors
    ///
    /// Returns [`LocationError::Missing`] when there is no `Location` header
    /// and [`LocationError::Unresolvable`] when it cannot be resolved.
    pub fn location(&self, request_url: &str) -> Result<Url, LocationError> {
        let location = self.header("location").ok_or(LocationError::Missing)?;
        let unresolvable = |e: url::ParseError| LocationError::Unresolvable {
            location: location.to_string(),
            reason: e.to_string(),
        };

        Url::parse(request_url)
            .and_then(|base| base.join(location))
            .map_err(unresolvable)
    }
}

/// Returns true if a resolved redirect target is the `expected` URL.
///
/// Both sides go through the same URL normalization, so `https://example.com`
/// equals `https://example.com/`. An `expected` that is not an absolute URL is
/// compared as written.
#[must_use]
pub fn same_target(location: &Url, expected: &str) -> bool {
    Url::parse(expected).map_or_else(|_| location.as_str() == expected, |e| e == *location)
}
