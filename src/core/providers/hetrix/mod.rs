//! HetrixTools upstream provider
//!
//! Client, configuration, wire types, and error mapping for the HetrixTools
//! v3 API.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::HetrixClient;
pub use config::HetrixConfig;
pub use models::{
    NumberOrString, RawFlatStats, RawLegacyStats, RawMonitor, RawMonitorListResponse,
    RawServerStats, RawStatusCode, RawTimestamp,
};
