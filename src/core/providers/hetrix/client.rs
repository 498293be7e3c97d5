//! HetrixTools API client
//!
//! Thin reqwest wrapper over the two upstream operations the service needs:
//! the uptime-monitors listing and per-monitor server stats. All caching and
//! coalescing happens a layer above; this client performs exactly one HTTP
//! call per invocation.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use tracing::debug;

use crate::utils::error::{GatewayError, Result};

use super::config::HetrixConfig;
use super::error::from_http_status;
use super::models::{RawMonitor, RawMonitorListResponse, RawServerStats};

/// HetrixTools API client
#[derive(Debug, Clone)]
pub struct HetrixClient {
    config: HetrixConfig,
    http_client: Client,
}

impl HetrixClient {
    /// Create a client with the configured timeouts
    pub fn new(config: HetrixConfig) -> Result<Self> {
        let http_client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .build()
            .map_err(|e| GatewayError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Fetch the raw monitor listing
    pub async fn list_monitors(&self) -> Result<Vec<RawMonitor>> {
        let payload = self.get_json("/uptime-monitors").await?;

        let listing: RawMonitorListResponse = serde_json::from_value(payload)
            .map_err(|e| GatewayError::malformed(format!("Unexpected monitor listing: {}", e)))?;

        debug!(count = listing.monitors.len(), "Fetched monitor listing");
        Ok(listing.monitors)
    }

    /// Fetch raw server stats for one monitor
    ///
    /// An upstream 404, or an ERROR body about a missing agent, means the
    /// monitor has no server agent attached.
    pub async fn server_stats(&self, monitor_id: &str) -> Result<RawServerStats> {
        let path = format!("/server-monitor/{}/stats", monitor_id);
        let payload = match self.get_json(&path).await {
            Ok(payload) => payload,
            Err(GatewayError::NotFound { .. }) => {
                return Err(GatewayError::no_agent(monitor_id));
            }
            Err(e) => return Err(e),
        };

        if let Some(message) = error_body_message(&payload) {
            if message.to_ascii_lowercase().contains("agent") {
                return Err(GatewayError::no_agent(monitor_id));
            }
            return Err(GatewayError::upstream_http(200, message));
        }

        serde_json::from_value(payload)
            .map_err(|e| GatewayError::malformed(format!("Unexpected server stats: {}", e)))
    }

    /// Perform an authenticated GET and return the parsed JSON body
    async fn get_json(&self, path: &str) -> Result<Value> {
        let token = self
            .config
            .api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                GatewayError::configuration(
                    "HETRIX_API_TOKEN environment variable is not configured",
                )
            })?;

        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!(%url, "Requesting upstream");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(from_http_status(status, &body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::network(format!("Failed to read response: {}", e)))?;

        serde_json::from_str(&body)
            .map_err(|e| GatewayError::malformed(format!("Invalid JSON from upstream: {}", e)))
    }
}

/// Extract the message of an in-band `{"status": "ERROR", ...}` body
fn error_body_message(payload: &Value) -> Option<String> {
    let status = payload.get("status")?.as_str()?;
    if !status.eq_ignore_ascii_case("error") {
        return None;
    }
    let message = payload
        .get("error_message")
        .and_then(|m| m.as_str())
        .unwrap_or("Upstream reported an error");
    Some(message.to_string())
}
