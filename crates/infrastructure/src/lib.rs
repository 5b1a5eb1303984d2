//! Probe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod config;
pub mod logging;

pub use adapters::{FailureLog, ReqwestTransport, ScraperDocumentQuery};
pub use config::{ConfigError, TransportConfig};
pub use logging::init_tracing;
