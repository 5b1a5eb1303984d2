//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod body;
mod context;
mod document;
mod transport;

pub use body::{BodySource, BodyStream};
pub use context::TestContext;
pub use document::{DocumentError, DocumentQuery};
pub use transport::{ReceivedResponse, Transport, TransportError};
