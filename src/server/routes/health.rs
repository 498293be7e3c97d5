//! Health check endpoint

use actix_web::{HttpResponse, web};
use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::time::Instant;
use tracing::debug;

/// Process start time, for the uptime field
static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Basic health check endpoint
///
/// Used by load balancers and uptime probes; deliberately does not touch the
/// upstream API, so an upstream outage never makes this instance look down.
pub async fn health_check() -> HttpResponse {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: START_TIME.elapsed().as_secs(),
    };

    HttpResponse::Ok().json(health_status)
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
}
