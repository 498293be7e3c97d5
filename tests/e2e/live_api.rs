//! Live upstream smoke test

use statusgate::core::fetcher::MonitorService;
use statusgate::core::fetcher::cache::CachePolicy;
use statusgate::core::providers::hetrix::{HetrixClient, HetrixConfig};

#[tokio::test]
#[ignore = "requires a live HETRIX_API_TOKEN"]
async fn live_monitor_listing_normalizes() {
    let config = HetrixConfig::from_env();
    if config.api_token.is_none() {
        eprintln!("HETRIX_API_TOKEN not set, skipping");
        return;
    }

    let service = MonitorService::new(
        HetrixClient::new(config).unwrap(),
        CachePolicy::default(),
    );

    let list = service.get_monitors().await.expect("live listing");
    for monitor in &list.monitors {
        assert!(monitor.uptime.is_finite());
        assert!((0.0..=100.0).contains(&monitor.uptime));
        assert!(monitor.response_time >= 0.0);
    }

    // A second call inside the fresh window must be served from cache.
    let cached = service.get_monitors().await.expect("cached listing");
    assert_eq!(cached.monitors.len(), list.monitors.len());
}
