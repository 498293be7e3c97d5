//! HetrixTools error mapping
//!
//! Translates upstream HTTP failures into the gateway taxonomy.

use crate::utils::error::GatewayError;

/// Map an upstream HTTP status to a gateway error
///
/// 404 maps to `NotFound` here; the stats call site turns it into `NoAgent`
/// since only there does a missing resource mean "no agent attached".
pub fn from_http_status(status: u16, body: &str) -> GatewayError {
    match status {
        401 | 403 => GatewayError::configuration(
            "HetrixTools rejected the API token; check HETRIX_API_TOKEN",
        ),
        404 => GatewayError::not_found("Upstream resource not found"),
        429 => GatewayError::rate_limited(extract_retry_after(body)),
        500..=599 => GatewayError::upstream_http(status, format!("Server error: {}", body)),
        _ => GatewayError::upstream_http(status, body),
    }
}

/// Extract a retry delay hint from a 429 body, if present
fn extract_retry_after(body: &str) -> Option<u64> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    if let Some(retry_after) = json.get("retry_after") {
        return retry_after.as_u64();
    }
    json.get("error")?.get("retry_after")?.as_u64()
}
