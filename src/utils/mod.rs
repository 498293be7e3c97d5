//! Utility modules for the gateway
//!
//! Shared plumbing that is not specific to any one component.

pub mod error;

pub use error::{GatewayError, Result};
