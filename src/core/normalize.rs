//! Payload normalization
//!
//! Total functions mapping raw upstream records into the canonical model.
//! Normalization never fails: every field has a defined fallback, so one
//! odd monitor record cannot take down the whole listing.
//!
//! Missing or malformed uptime defaults to 100.0. The status field is the
//! authoritative health signal; a gap in uptime reporting must not render
//! as a 0% outage.

use chrono::Utc;

use crate::core::models::{
    LastCheck, Monitor, MonitorStatus, NetworkThroughput, ServerStats,
};
use crate::core::providers::hetrix::models::{
    NumberOrString, RawFlatStats, RawLegacySample, RawMonitor, RawServerStats, RawStatusCode,
};

/// Category value reserved for monitors with a server agent attached
const AGENT_CATEGORY: &str = "Nodes";

/// Fallback uptime percentage for missing or malformed values
const DEFAULT_UPTIME: f64 = 100.0;

/// Normalize one raw monitor record
pub fn normalize_monitor(raw: &RawMonitor) -> Monitor {
    let category = raw
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("Uncategorized")
        .to_string();
    let has_agent = category == AGENT_CATEGORY;

    Monitor {
        id: raw.id.as_ref().map(coerce_id).unwrap_or_default(),
        name: raw
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Unknown Monitor")
            .to_string(),
        status: normalize_status(raw),
        uptime: normalize_uptime(raw.uptime.as_ref()),
        last_check: raw
            .last_check
            .as_ref()
            .map(|ts| ts.to_last_check())
            .unwrap_or(LastCheck::Unknown),
        monitor_type: raw
            .monitor_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("unknown")
            .to_string(),
        response_time: mean_response_time(raw),
        category,
        has_agent,
    }
}

/// Normalize a whole listing
pub fn normalize_monitors(raw: &[RawMonitor]) -> Vec<Monitor> {
    raw.iter().map(normalize_monitor).collect()
}

/// Map the upstream status vocabulary onto the canonical set
///
/// Precedence: explicit `up`, explicit `down`, maintenance (either flag),
/// then the numeric status code of older API versions, then `Unknown`.
fn normalize_status(raw: &RawMonitor) -> MonitorStatus {
    match raw.uptime_status.as_deref() {
        Some("up") => return MonitorStatus::Operational,
        Some("down") => return MonitorStatus::Down,
        Some("maintenance") => return MonitorStatus::Degraded,
        _ => {}
    }

    if raw.monitor_status.as_deref() == Some("maintenance") {
        return MonitorStatus::Degraded;
    }

    match raw.status {
        Some(RawStatusCode::Code(1)) => MonitorStatus::Operational,
        Some(RawStatusCode::Code(2)) => MonitorStatus::Degraded,
        Some(RawStatusCode::Code(_)) => MonitorStatus::Down,
        _ => MonitorStatus::Unknown,
    }
}

/// Parse uptime into a finite percentage in `[0, 100]`
fn normalize_uptime(raw: Option<&NumberOrString>) -> f64 {
    let value = raw
        .and_then(NumberOrString::as_f64)
        .unwrap_or(DEFAULT_UPTIME)
        .clamp(0.0, 100.0);
    round2(value)
}

/// Arithmetic mean of per-location response times
///
/// A location without a reading counts as 0; no locations at all means 0.
fn mean_response_time(raw: &RawMonitor) -> f64 {
    let Some(locations) = raw.locations.as_ref() else {
        return 0.0;
    };
    if locations.is_empty() {
        return 0.0;
    }

    let total: f64 = locations
        .values()
        .map(|loc| loc.response_time.unwrap_or(0.0))
        .sum();
    round2(total / locations.len() as f64)
}

/// Render an upstream id as a string
fn coerce_id(id: &NumberOrString) -> String {
    match id {
        NumberOrString::Num(n) if n.fract() == 0.0 => format!("{}", *n as i64),
        NumberOrString::Num(n) => format!("{}", n),
        NumberOrString::Text(s) => s.clone(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Normalize a server stats payload of either layout
///
/// The legacy layout reports the newest sample first; an empty sample list
/// normalizes to all zeros.
pub fn normalize_server_stats(raw: &RawServerStats) -> ServerStats {
    match raw {
        RawServerStats::Legacy(legacy) => {
            let latest = legacy.stats.first();
            ServerStats {
                cpu: sample_value(latest, |s| s.cpu.as_ref()),
                ram: sample_value(latest, |s| s.ram.as_ref()),
                disk: sample_value(latest, |s| s.disk.as_ref()),
                network: NetworkThroughput {
                    inbound: sample_value(latest, |s| {
                        s.network.as_ref().and_then(|n| n.inbound.as_ref())
                    }),
                    outbound: sample_value(latest, |s| {
                        s.network.as_ref().and_then(|n| n.outbound.as_ref())
                    }),
                },
                timestamp: Utc::now(),
            }
        }
        RawServerStats::Flat(flat) => normalize_flat_stats(flat),
    }
}

fn normalize_flat_stats(flat: &RawFlatStats) -> ServerStats {
    ServerStats {
        cpu: parse_or_zero(flat.cpu.as_ref()),
        ram: parse_or_zero(flat.ram.as_ref()),
        disk: parse_or_zero(flat.disk.as_ref()),
        network: NetworkThroughput {
            inbound: parse_or_zero(flat.network.as_ref().and_then(|n| n.inbound.as_ref())),
            outbound: parse_or_zero(flat.network.as_ref().and_then(|n| n.outbound.as_ref())),
        },
        timestamp: Utc::now(),
    }
}

fn sample_value<'a, F>(sample: Option<&'a RawLegacySample>, field: F) -> f64
where
    F: Fn(&'a RawLegacySample) -> Option<&'a NumberOrString>,
{
    parse_or_zero(sample.and_then(field))
}

fn parse_or_zero(raw: Option<&NumberOrString>) -> f64 {
    raw.and_then(NumberOrString::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_monitor(value: serde_json::Value) -> RawMonitor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_status_vocabulary_mapping() {
        let cases = [
            (json!({"uptime_status": "up"}), MonitorStatus::Operational),
            (json!({"uptime_status": "down"}), MonitorStatus::Down),
            (
                json!({"uptime_status": "maintenance"}),
                MonitorStatus::Degraded,
            ),
            (
                json!({"monitor_status": "maintenance"}),
                MonitorStatus::Degraded,
            ),
            (json!({"Status": 1}), MonitorStatus::Operational),
            (json!({"Status": 2}), MonitorStatus::Degraded),
            (json!({"Status": 0}), MonitorStatus::Down),
            (json!({"Status": 3}), MonitorStatus::Down),
            (json!({"uptime_status": "paused"}), MonitorStatus::Unknown),
            (json!({}), MonitorStatus::Unknown),
        ];

        for (value, expected) in cases {
            let monitor = normalize_monitor(&raw_monitor(value.clone()));
            assert_eq!(monitor.status, expected, "input: {value}");
        }
    }

    #[test]
    fn test_textual_status_wins_over_numeric_code() {
        let monitor = normalize_monitor(&raw_monitor(json!({
            "uptime_status": "down",
            "Status": 1
        })));
        assert_eq!(monitor.status, MonitorStatus::Down);
    }

    #[test]
    fn test_operational_monitor_with_epoch_timestamp() {
        let monitor = normalize_monitor(&raw_monitor(json!({
            "id": "1",
            "uptime_status": "up",
            "uptime": "99.95",
            "last_check": 1_700_000_000
        })));

        assert_eq!(monitor.id, "1");
        assert_eq!(monitor.status, MonitorStatus::Operational);
        assert!((monitor.uptime - 99.95).abs() < f64::EPSILON);
        match monitor.last_check {
            LastCheck::At(instant) => assert_eq!(instant.timestamp(), 1_700_000_000),
            LastCheck::Unknown => panic!("epoch timestamp should normalize"),
        }
    }

    #[test]
    fn test_uptime_defaults_and_clamping() {
        // Missing and malformed values take the optimistic default.
        let monitor = normalize_monitor(&raw_monitor(json!({})));
        assert_eq!(monitor.uptime, 100.0);

        let monitor = normalize_monitor(&raw_monitor(json!({"uptime": "n/a"})));
        assert_eq!(monitor.uptime, 100.0);

        // Out-of-range values clamp instead of leaking through.
        let monitor = normalize_monitor(&raw_monitor(json!({"uptime": "250"})));
        assert_eq!(monitor.uptime, 100.0);

        let monitor = normalize_monitor(&raw_monitor(json!({"uptime": -3.0})));
        assert_eq!(monitor.uptime, 0.0);

        let monitor = normalize_monitor(&raw_monitor(json!({"uptime": "99.999"})));
        assert_eq!(monitor.uptime, 100.0);

        let monitor = normalize_monitor(&raw_monitor(json!({"uptime": 99.954})));
        assert_eq!(monitor.uptime, 99.95);
    }

    #[test]
    fn test_response_time_mean() {
        let monitor = normalize_monitor(&raw_monitor(json!({
            "locations": {
                "nyc": {"response_time": 100.0},
                "fra": {"response_time": 200.0},
                "sgp": {}
            }
        })));
        assert_eq!(monitor.response_time, 100.0);
    }

    #[test]
    fn test_response_time_empty_locations() {
        let monitor = normalize_monitor(&raw_monitor(json!({"locations": {}})));
        assert_eq!(monitor.response_time, 0.0);
        assert!(monitor.response_time.is_finite());

        let monitor = normalize_monitor(&raw_monitor(json!({})));
        assert_eq!(monitor.response_time, 0.0);
    }

    #[test]
    fn test_category_and_agent_flag() {
        let monitor = normalize_monitor(&raw_monitor(json!({"category": "Nodes"})));
        assert_eq!(monitor.category, "Nodes");
        assert!(monitor.has_agent);

        let monitor = normalize_monitor(&raw_monitor(json!({"category": "Websites"})));
        assert!(!monitor.has_agent);

        let monitor = normalize_monitor(&raw_monitor(json!({"category": ""})));
        assert_eq!(monitor.category, "Uncategorized");
        assert!(!monitor.has_agent);
    }

    #[test]
    fn test_identity_fallbacks() {
        let monitor = normalize_monitor(&raw_monitor(json!({})));
        assert_eq!(monitor.id, "");
        assert_eq!(monitor.name, "Unknown Monitor");
        assert_eq!(monitor.monitor_type, "unknown");
        assert_eq!(monitor.last_check, LastCheck::Unknown);

        let monitor = normalize_monitor(&raw_monitor(json!({"ID": 42, "Name": "db-1"})));
        assert_eq!(monitor.id, "42");
        assert_eq!(monitor.name, "db-1");
    }

    #[test]
    fn test_server_stats_flat_layout() {
        let raw: RawServerStats = serde_json::from_value(json!({
            "cpu": "12.5",
            "ram": 33.0,
            "disk": "bogus",
            "network": {"in": "1.5", "out": 2.5}
        }))
        .unwrap();

        let stats = normalize_server_stats(&raw);
        assert_eq!(stats.cpu, 12.5);
        assert_eq!(stats.ram, 33.0);
        assert_eq!(stats.disk, 0.0);
        assert_eq!(stats.network.inbound, 1.5);
        assert_eq!(stats.network.outbound, 2.5);
    }

    #[test]
    fn test_server_stats_legacy_layout_uses_latest_sample() {
        let raw: RawServerStats = serde_json::from_value(json!({
            "Stats": [
                {"CPU": "50", "RAM": "60", "Disk": 70.0, "Network": {"In": 1.0, "Out": 2.0}},
                {"CPU": "10", "RAM": "20", "Disk": 30.0}
            ]
        }))
        .unwrap();

        let stats = normalize_server_stats(&raw);
        assert_eq!(stats.cpu, 50.0);
        assert_eq!(stats.ram, 60.0);
        assert_eq!(stats.disk, 70.0);
        assert_eq!(stats.network.inbound, 1.0);
    }

    #[test]
    fn test_server_stats_empty_legacy_sample_list() {
        let raw: RawServerStats = serde_json::from_value(json!({"Stats": []})).unwrap();
        let stats = normalize_server_stats(&raw);
        assert_eq!(stats.cpu, 0.0);
        assert_eq!(stats.network.inbound, 0.0);
    }
}
