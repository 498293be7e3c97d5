//! Shared test infrastructure

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use statusgate::config::Config;
use statusgate::core::fetcher::MonitorService;
use statusgate::core::providers::hetrix::HetrixConfig;
use statusgate::server::AppState;

/// A monitor listing payload in the current upstream shape
pub fn listing_payload() -> serde_json::Value {
    json!({
        "status": "SUCCESS",
        "monitors": [
            {
                "id": "web-1",
                "name": "Website",
                "uptime_status": "up",
                "uptime": "99.95",
                "last_check": 1_700_000_000,
                "type": "website",
                "category": "Websites",
                "locations": {
                    "nyc": {"response_time": 100.0},
                    "fra": {"response_time": 200.0}
                }
            },
            {
                "id": "node-1",
                "name": "App Server",
                "uptime_status": "up",
                "uptime": 100,
                "last_check": 1_700_000_000,
                "type": "service",
                "category": "Nodes"
            }
        ]
    })
}

/// A flat server stats payload
pub fn stats_payload() -> serde_json::Value {
    json!({
        "status": "SUCCESS",
        "cpu": "12.5",
        "ram": 33.0,
        "disk": "50",
        "network": {"in": "1.5", "out": 2.5}
    })
}

/// Start a mock upstream serving the standard fixtures
pub async fn mock_upstream() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/uptime-monitors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_payload()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/server-monitor/node-1/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stats_payload()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/server-monitor/web-1/stats"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    server
}

/// Build a config pointed at the given upstream base URL
pub fn test_config(base_url: &str) -> Config {
    Config {
        hetrix: HetrixConfig {
            api_token: Some("test-token".to_string()),
            base_url: base_url.to_string(),
            ..HetrixConfig::default()
        },
        ..Config::default()
    }
}

/// Build the application state backing a test app
pub fn app_state(config: Config) -> AppState {
    let monitors = MonitorService::from_config(&config).expect("service construction");
    AppState::new(config, monitors)
}
