//! # Statusgate
//!
//! Backend for a status page: serves uptime and server-resource metrics
//! sourced from the HetrixTools monitoring API behind a short-lived
//! read-through cache.
//!
//! The cache serves fresh data with zero upstream calls, serves stale data
//! while revalidating in the background, coalesces concurrent refreshes into
//! a single upstream request, and honors a cooldown after rate-limit
//! failures. This shields the upstream provider's rate limits from bursty
//! page traffic and keeps the page responsive during upstream outages.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use statusgate::{Config, server::HttpServer};
//!
//! #[tokio::main]
//! async fn main() -> statusgate::Result<()> {
//!     let config = Config::from_env()?;
//!     HttpServer::new(&config)?.start().await
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::fetcher::MonitorService;
pub use crate::core::models::{LastCheck, Monitor, MonitorList, MonitorStatus, ServerStats};
pub use crate::utils::error::{GatewayError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
