//! Raw HetrixTools wire types
//!
//! Upstream payload shapes vary across API versions: keys change casing,
//! numbers arrive as strings, and server stats come in two different layouts.
//! Each point of variation is modeled as its own serde variant here so the
//! normalizer can match on structure instead of poking at loose JSON.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashMap;

use crate::core::models::LastCheck;

/// A JSON value that is either a number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Num(f64),
    Text(String),
}

impl NumberOrString {
    /// Parse into a finite float; `None` for malformed input
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumberOrString::Num(n) => Some(*n),
            NumberOrString::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

/// A check timestamp, either epoch seconds or a formatted string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Epoch(i64),
    Text(String),
}

impl RawTimestamp {
    /// Convert to the canonical representation
    ///
    /// Unparseable values map to `LastCheck::Unknown`; the current time is
    /// never substituted.
    pub fn to_last_check(&self) -> LastCheck {
        match self {
            RawTimestamp::Epoch(secs) => match Utc.timestamp_opt(*secs, 0).single() {
                Some(instant) => LastCheck::At(instant),
                None => LastCheck::Unknown,
            },
            RawTimestamp::Text(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(instant) => LastCheck::At(instant.with_timezone(&Utc)),
                Err(_) => LastCheck::Unknown,
            },
        }
    }
}

/// A status field that is either a numeric code or free text
///
/// Older API versions report a numeric `Status` code on each monitor; the
/// textual `uptime_status` vocabulary supersedes it when present.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawStatusCode {
    Code(i64),
    Text(String),
}

/// Per-location probe results attached to a monitor
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub response_time: Option<f64>,
}

/// One monitor record as returned by the uptime-monitors listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMonitor {
    #[serde(default, alias = "ID")]
    pub id: Option<NumberOrString>,
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default)]
    pub uptime_status: Option<String>,
    #[serde(default)]
    pub monitor_status: Option<String>,
    #[serde(default, alias = "Status")]
    pub status: Option<RawStatusCode>,
    #[serde(default)]
    pub uptime: Option<NumberOrString>,
    #[serde(default)]
    pub last_check: Option<RawTimestamp>,
    #[serde(default, rename = "type")]
    pub monitor_type: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub locations: Option<HashMap<String, RawLocation>>,
}

/// Response envelope of the uptime-monitors listing
#[derive(Debug, Clone, Deserialize)]
pub struct RawMonitorListResponse {
    #[serde(default)]
    pub monitors: Vec<RawMonitor>,
}

/// Server stats payload, either of the two known layouts
///
/// The legacy layout nests samples under a `Stats` array with capitalized
/// keys; the current layout is flat with lowercase keys. Variant order
/// matters: the legacy shape is structurally distinctive and must be tried
/// first, since the flat shape's fields are all optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawServerStats {
    Legacy(RawLegacyStats),
    Flat(RawFlatStats),
}

/// Legacy server stats: newest sample first in a `Stats` array
#[derive(Debug, Clone, Deserialize)]
pub struct RawLegacyStats {
    #[serde(rename = "Stats")]
    pub stats: Vec<RawLegacySample>,
}

/// One sample in the legacy stats layout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLegacySample {
    #[serde(default, rename = "CPU")]
    pub cpu: Option<NumberOrString>,
    #[serde(default, rename = "RAM")]
    pub ram: Option<NumberOrString>,
    #[serde(default, rename = "Disk")]
    pub disk: Option<NumberOrString>,
    #[serde(default, rename = "Network")]
    pub network: Option<RawLegacyNetwork>,
}

/// Network block in the legacy stats layout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLegacyNetwork {
    #[serde(default, rename = "In")]
    pub inbound: Option<NumberOrString>,
    #[serde(default, rename = "Out")]
    pub outbound: Option<NumberOrString>,
}

/// Current flat server stats layout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFlatStats {
    #[serde(default)]
    pub cpu: Option<NumberOrString>,
    #[serde(default)]
    pub ram: Option<NumberOrString>,
    #[serde(default)]
    pub disk: Option<NumberOrString>,
    #[serde(default)]
    pub network: Option<RawFlatNetwork>,
}

/// Network block in the flat stats layout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFlatNetwork {
    #[serde(default, rename = "in")]
    pub inbound: Option<NumberOrString>,
    #[serde(default, rename = "out")]
    pub outbound: Option<NumberOrString>,
}
