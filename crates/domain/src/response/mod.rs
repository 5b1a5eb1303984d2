//! Received response types

mod head;

pub use head::{LocationError, ResponseHead, StatusCode, same_target};
