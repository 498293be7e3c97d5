//! HTTP server core implementation

use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, web};
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::config::{Config, ServerConfig};
use crate::core::fetcher::MonitorService;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let monitors = MonitorService::from_config(config)?;
        let state = AppState::new(config.clone(), monitors);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || {
            // A public read-only API: permissive CORS is intentional so any
            // status-page frontend origin can poll it.
            App::new()
                .app_data(state.clone())
                .wrap(Cors::permissive())
                .wrap(TracingLogger::default())
                .configure(routes::health::configure_routes)
                .configure(routes::monitors::configure_routes)
        })
        .bind(&bind_addr)
        .map_err(|e| {
            GatewayError::configuration(format!("Failed to bind {}: {}", bind_addr, e))
        })?
        .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::network(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
