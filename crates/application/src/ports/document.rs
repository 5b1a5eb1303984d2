//! Document-query port

use thiserror::Error;

/// Errors raised while parsing a document or resolving a selector.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The body is not a parseable document.
    #[error("document parse failed: {0}")]
    Parse(String),

    /// A selector token is malformed.
    #[error("invalid selector '{token}': {reason}")]
    InvalidSelector {
        /// Offending token.
        token: String,
        /// Parser message.
        reason: String,
    },
}

/// Port for structural queries over a parsed document.
///
/// A selector expression is handled as a sequence of simple selector
/// tokens. Each token resolves to one query; a sequence of queries is
/// applied with descendant semantics, so every query matches inside the
/// elements matched by the one before it.
pub trait DocumentQuery: Send + Sync {
    /// Parsed document.
    type Document;
    /// Resolved simple selector.
    type Query;

    /// Parses a response body into a document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if the body cannot be parsed.
    fn parse(&self, source: &str) -> Result<Self::Document, DocumentError>;

    /// Resolves one simple selector token such as `div.content` or `span#test`.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidSelector`] for malformed tokens.
    fn resolve(&self, token: &str) -> Result<Self::Query, DocumentError>;

    /// Returns the number of distinct elements matched by the composed queries.
    ///
    /// An empty query sequence matches nothing.
    fn apply(&self, document: &Self::Document, queries: &[Self::Query]) -> usize;
}
