//! Probe Domain - Core request and response types
//!
//! This crate defines the domain model for the Probe functional-testing client.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod request;
pub mod response;
pub mod testing;

pub use error::{DomainError, DomainResult};
pub use request::{FORM_CONTENT_TYPE, HeaderSet, HttpMethod, OutgoingRequest, ParameterSet};
pub use response::{LocationError, ResponseHead, StatusCode, same_target};
pub use testing::{Assertion, AssertionFailure};
