//! Monitor and server-stats endpoints
//!
//! The JSON surface consumed by the status-page frontend. Success responses
//! advertise the same windows the internal cache uses, so browser and CDN
//! caches line up with the fetcher's behavior.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::core::models::{NetworkThroughput, ServerStats};
use crate::config::StatsDisplayConfig;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;

/// Configure monitor routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/monitors", web::get().to(list_monitors))
            .route("/monitors/{id}", web::get().to(get_monitor))
            .route("/monitors/{id}/stats", web::get().to(get_server_stats))
            .route("/refresh", web::post().to(refresh_monitors)),
    );
}

/// List all monitors
///
/// Served from cache whenever possible; a typed error surfaces only when no
/// usable data exists at all.
pub async fn list_monitors(state: web::Data<AppState>) -> Result<HttpResponse, GatewayError> {
    debug!("Monitor list requested");

    let list = state.monitors.get_monitors().await.map_err(|e| {
        error!("Failed to fetch monitors: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", cache_header(&state)))
        .json(list))
}

/// Get a single monitor by id
pub async fn get_monitor(
    state: web::Data<AppState>,
    monitor_id: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
    debug!("Monitor {} requested", monitor_id);

    let monitor = state.monitors.get_monitor(&monitor_id).await?;

    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", cache_header(&state)))
        .json(monitor))
}

/// Get server resource stats for a monitor
///
/// Responds 404 with a distinct `no-agent` code when the monitor has no
/// server agent; the frontend omits the section instead of showing an error.
pub async fn get_server_stats(
    state: web::Data<AppState>,
    monitor_id: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
    debug!("Server stats requested for monitor {}", monitor_id);

    if !state.config.stats.system {
        // Stats display is switched off entirely; skip the upstream call.
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("stats-disabled".to_string())));
    }

    let stats = state.monitors.get_server_stats(&monitor_id).await?;
    let view = apply_display_flags(stats, &state.config.stats);

    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", cache_header(&state)))
        .json(ServerStatsResponse {
            status: "success",
            data: view,
        }))
}

/// Force a cache-bypassing refresh of the monitor list
pub async fn refresh_monitors(state: web::Data<AppState>) -> Result<HttpResponse, GatewayError> {
    debug!("Forced refresh requested");

    let list = state.monitors.refresh_monitors().await.map_err(|e| {
        error!("Failed to refresh monitors: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store"))
        .json(list))
}

/// Server stats response envelope
#[derive(Debug, Clone, serde::Serialize)]
struct ServerStatsResponse {
    status: &'static str,
    data: ServerStatsView,
}

/// Server stats filtered by the display flags
#[derive(Debug, Clone, serde::Serialize)]
struct ServerStatsView {
    #[serde(skip_serializing_if = "Option::is_none")]
    cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ram: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    network: Option<NetworkThroughput>,
    timestamp: DateTime<Utc>,
}

/// Blank out the categories an operator chose not to display
fn apply_display_flags(stats: ServerStats, flags: &StatsDisplayConfig) -> ServerStatsView {
    ServerStatsView {
        cpu: flags.cpu.then_some(stats.cpu),
        ram: flags.ram.then_some(stats.ram),
        disk: flags.disk.then_some(stats.disk),
        network: flags.network.then_some(stats.network),
        timestamp: stats.timestamp,
    }
}

/// Cache-Control value mirroring the configured cache windows
fn cache_header(state: &AppState) -> String {
    format!(
        "public, max-age={}, stale-while-revalidate={}",
        state.config.cache.fresh_secs, state.config.cache.stale_secs
    )
}
