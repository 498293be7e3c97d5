//! Error handling for the gateway
//!
//! This module defines all error types used throughout the service.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the gateway
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the gateway
///
/// Every failure surfaced by the fetcher or the upstream client is one of
/// these variants; route handlers rely on the `ResponseError` impl below for
/// the HTTP mapping.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// Missing or invalid service configuration (e.g. no API token)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Upstream returned a non-2xx response
    #[error("Upstream request failed with status {status}: {message}")]
    UpstreamHttp { status: u16, message: String },

    /// Upstream rate limit hit (explicit 429 or local cooldown)
    #[error("Upstream rate limit exceeded")]
    RateLimited { retry_after: Option<u64> },

    /// Upstream payload did not match any known shape
    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },

    /// The monitor has no server agent attached; resource stats do not exist
    ///
    /// Not a failure: callers omit the stats section instead of showing an
    /// error banner.
    #[error("No agent attached to monitor {monitor_id}")]
    NoAgent { monitor_id: String },

    /// Transport-level failure (connect error, timeout)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Requested resource does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },
}

/// Helper constructors
impl GatewayError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn upstream_http<S: Into<String>>(status: u16, message: S) -> Self {
        Self::UpstreamHttp {
            status,
            message: message.into(),
        }
    }

    pub fn rate_limited(retry_after: Option<u64>) -> Self {
        Self::RateLimited { retry_after }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn no_agent<S: Into<String>>(monitor_id: S) -> Self {
        Self::NoAgent {
            monitor_id: monitor_id.into(),
        }
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Whether this error counts as an upstream fault for caching purposes
    ///
    /// Upstream faults are absorbed by stale cache data when possible;
    /// configuration and not-found errors are not.
    pub fn is_upstream_fault(&self) -> bool {
        matches!(
            self,
            Self::UpstreamHttp { .. }
                | Self::RateLimited { .. }
                | Self::MalformedResponse { .. }
                | Self::Network { .. }
        )
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            Self::Network {
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            Self::UpstreamHttp {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            GatewayError::Configuration { .. } => (
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "config-error",
                self.to_string(),
            ),
            GatewayError::UpstreamHttp { .. } => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "upstream-error",
                self.to_string(),
            ),
            GatewayError::RateLimited { .. } => (
                actix_web::http::StatusCode::TOO_MANY_REQUESTS,
                "rate-limited",
                self.to_string(),
            ),
            GatewayError::MalformedResponse { .. } => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "malformed-response",
                self.to_string(),
            ),
            GatewayError::NoAgent { .. } => (
                actix_web::http::StatusCode::NOT_FOUND,
                "no-agent",
                self.to_string(),
            ),
            GatewayError::Network { .. } => (
                actix_web::http::StatusCode::BAD_GATEWAY,
                "network-error",
                self.to_string(),
            ),
            GatewayError::NotFound { .. } => (
                actix_web::http::StatusCode::NOT_FOUND,
                "not-found",
                self.to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        let mut builder = HttpResponse::build(status_code);

        match self {
            // A missing agent is a stable fact; let HTTP caches hold it.
            GatewayError::NoAgent { .. } => {
                builder.insert_header(("Cache-Control", "public, max-age=300"));
            }
            GatewayError::RateLimited { retry_after } => {
                builder.insert_header(("Retry-After", retry_after.unwrap_or(60).to_string()));
            }
            _ => {}
        }

        builder.json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
