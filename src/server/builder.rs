//! Server bootstrap
//!
//! Loads configuration from the environment and runs the HTTP server.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Run the server with configuration from the environment
pub async fn run_server() -> Result<()> {
    info!("Starting statusgate");

    let config = Config::from_env()?;

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}",
        config.server.address()
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/monitors - Cached monitor list");
    info!("   GET  /api/monitors/{{id}} - Single monitor");
    info!("   GET  /api/monitors/{{id}}/stats - Server resource stats");
    info!("   POST /api/refresh - Forced refresh");

    server.start().await
}
