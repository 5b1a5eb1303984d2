//! Response assertions and their failures.
//!
//! This module names the checks a test can run against a response and the
//! failures those checks (and the request itself) can report.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::response::StatusCode;

/// A check run against a received response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    /// The response redirects to a URL.
    RedirectedTo {
        /// Expected absolute redirect target.
        expected: String,
    },
    /// The response body contains text.
    Contains {
        /// Text to search for.
        text: String,
    },
    /// The response document matches a structural selector.
    Selector {
        /// Whitespace-separated selector expression.
        expression: String,
    },
    /// The response has a status code.
    Code {
        /// Expected status code.
        expected: u16,
    },
}

impl Assertion {
    /// Get a human-readable description of this assertion.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::RedirectedTo { expected } => format!("Redirected to '{expected}'"),
            Self::Contains { text } => format!("Body contains '{text}'"),
            Self::Selector { expression } => format!("Document matches '{expression}'"),
            Self::Code { expected } => format!("Status code = {expected}"),
        }
    }

    /// Returns true if this assertion reads the response body.
    #[must_use]
    pub const fn reads_body(&self) -> bool {
        matches!(self, Self::Contains { .. } | Self::Selector { .. })
    }
}

/// A failure reported to the test context.
///
/// The `Display` output is the message the test sees.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssertionFailure {
    /// The transport could not complete the request.
    #[error("Bad response: {reason}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport error message.
        reason: String,
    },

    /// The request could not be built.
    #[error("Bad request for {url}: {reason}")]
    InvalidRequest {
        /// Requested URL.
        url: String,
        /// Construction error message.
        reason: String,
    },

    /// An assertion ran against a request that never received a response.
    #[error("No response received: {url}")]
    NoResponse {
        /// Requested URL.
        url: String,
    },

    /// The response has no usable `Location` header.
    #[error("Response not a redirect: {status}")]
    NotRedirect {
        /// Status of the response.
        status: StatusCode,
    },

    /// The response redirects somewhere else.
    #[error("Redirect not matched: {actual} does not equal {expected}")]
    RedirectMismatch {
        /// Resolved redirect target.
        actual: String,
        /// Expected redirect target.
        expected: String,
    },

    /// The response body could not be read.
    #[error("Response not readable: {url}")]
    Unreadable {
        /// Requested URL.
        url: String,
    },

    /// The response body lacks the expected text.
    #[error("Response body does not contain {text}")]
    MissingText {
        /// Expected text.
        text: String,
    },

    /// The response body is not a parseable document.
    #[error("Could not parse response: {url}")]
    Unparseable {
        /// Requested URL.
        url: String,
    },

    /// A selector token could not be resolved.
    #[error("Problem with selector: {token}")]
    BadSelector {
        /// Offending token.
        token: String,
    },

    /// The selector matched nothing.
    #[error("Selector not found: {selector}")]
    SelectorNotFound {
        /// Full selector expression.
        selector: String,
    },

    /// The response has a different status code.
    #[error("Invalid response code. Expected {expected}, Received {actual}")]
    CodeMismatch {
        /// Expected status code.
        expected: u16,
        /// Received status code.
        actual: u16,
    },
}
