//! Probe Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits for the transport, document-query and test-reporting boundaries
//! - The request issuer use case
//! - The test response wrapper and its soft assertions

pub mod issuer;
pub mod ports;
pub mod response;

pub use issuer::RequestIssuer;
pub use ports::{
    BodySource, BodyStream, DocumentError, DocumentQuery, ReceivedResponse, TestContext,
    Transport, TransportError,
};
pub use response::TestResponse;

#[cfg(test)]
mod test_support;
