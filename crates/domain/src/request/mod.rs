//! Outgoing request types
//!
//! Parameter and header containers, the supported methods, and the
//! construction rules that turn them into a concrete request.

mod headers;
mod method;
mod outgoing;
mod params;

pub use headers::HeaderSet;
pub use method::HttpMethod;
pub use outgoing::{FORM_CONTENT_TYPE, OutgoingRequest};
pub use params::ParameterSet;
