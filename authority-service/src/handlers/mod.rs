//! HTTP handlers for authority-service.

pub mod authority;
pub mod metrics;

pub use authority::*;
