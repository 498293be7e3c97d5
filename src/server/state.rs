//! Application state shared across HTTP handlers

use std::sync::Arc;

use crate::config::Config;
use crate::core::fetcher::MonitorService;

/// HTTP server state shared across handlers
///
/// Both fields are behind `Arc` so cloning the state per worker stays cheap
/// and every handler observes the same cache cells.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (read-only after startup)
    pub config: Arc<Config>,
    /// The monitor data fetcher owning the cache
    pub monitors: Arc<MonitorService>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, monitors: MonitorService) -> Self {
        Self {
            config: Arc::new(config),
            monitors: Arc::new(monitors),
        }
    }
}
