//! Single-read response body

use std::fmt;

use async_trait::async_trait;

use super::TransportError;

/// Source of a response body that can be drained exactly once.
#[async_trait]
pub trait BodySource: Send {
    /// Reads the entire body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::BodyRead`] if the body could not be read.
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError>;
}

/// A response body that is read to completion at most once.
///
/// The first [`read_to_end`](Self::read_to_end) drains the source; every
/// later read yields an empty body. Nothing is buffered for replay.
pub struct BodyStream {
    source: Option<Box<dyn BodySource>>,
}

impl BodyStream {
    /// Wraps a body source.
    #[must_use]
    pub fn new(source: impl BodySource + 'static) -> Self {
        Self {
            source: Some(Box::new(source)),
        }
    }

    /// A body that is already exhausted.
    #[must_use]
    pub const fn empty() -> Self {
        Self { source: None }
    }

    /// A body backed by bytes already in memory.
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(Buffered(bytes.into()))
    }

    /// Returns true once the body has been read (or never had a source).
    #[must_use]
    pub const fn is_consumed(&self) -> bool {
        self.source.is_none()
    }

    /// Reads the whole body, leaving the stream exhausted.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the first read fails. The stream is
    /// exhausted afterwards either way.
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>, TransportError> {
        match self.source.take() {
            Some(source) => source.read_all().await,
            None => Ok(Vec::new()),
        }
    }
}

impl fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyStream")
            .field("consumed", &self.is_consumed())
            .finish()
    }
}

struct Buffered(Vec<u8>);

#[async_trait]
impl BodySource for Buffered {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, TransportError> {
        Ok(self.0)
    }
}
