//! Canonical data model
//!
//! The stable internal shape every upstream payload is normalized into.
//! Route handlers serialize these types directly, so the serde field names
//! here are the public wire format of this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical monitor status vocabulary
///
/// Upstream vocabularies (`up`/`down`/`maintenance`, numeric codes) are
/// mapped onto this set by the normalizer; anything unrecognized becomes
/// `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorStatus {
    Operational,
    Degraded,
    Down,
    Unknown,
}

/// Timestamp of the last upstream check
///
/// Serializes as an RFC 3339 string, or the literal `"unknown"` when the
/// upstream never supplied one. The normalizer never substitutes the current
/// time for a missing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastCheck {
    At(DateTime<Utc>),
    Unknown,
}

impl Serialize for LastCheck {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LastCheck::At(instant) => serializer.serialize_str(&instant.to_rfc3339()),
            LastCheck::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for LastCheck {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        match DateTime::parse_from_rfc3339(&value) {
            Ok(instant) => Ok(LastCheck::At(instant.with_timezone(&Utc))),
            Err(_) => Ok(LastCheck::Unknown),
        }
    }
}

/// One monitored service, in canonical form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitor {
    /// Opaque identifier, stable across polls
    pub id: String,
    /// Display name
    pub name: String,
    /// Canonical status
    pub status: MonitorStatus,
    /// Uptime percentage in `[0, 100]`, always finite
    pub uptime: f64,
    /// Time of the last upstream check
    pub last_check: LastCheck,
    /// Protocol/category label from upstream
    #[serde(rename = "type")]
    pub monitor_type: String,
    /// Mean response time across locations, milliseconds
    pub response_time: f64,
    /// Grouping label for display
    pub category: String,
    /// Whether a server agent is attached (resource stats are fetchable)
    pub has_agent: bool,
}

/// The full monitor list, as served to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorList {
    pub monitors: Vec<Monitor>,
}

/// Network throughput of a server agent
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetworkThroughput {
    #[serde(rename = "in")]
    pub inbound: f64,
    #[serde(rename = "out")]
    pub outbound: f64,
}

/// Resource stats reported by a monitor's server agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStats {
    /// CPU usage percentage
    pub cpu: f64,
    /// RAM usage percentage
    pub ram: f64,
    /// Disk usage percentage
    pub disk: f64,
    /// Network throughput
    pub network: NetworkThroughput,
    /// When this snapshot was assembled
    pub timestamp: DateTime<Utc>,
}
