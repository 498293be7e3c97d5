//! HTTP route integration tests

use actix_web::{App, test, web};
use serde_json::Value;

use statusgate::server::routes;

use crate::common::{app_state, mock_upstream, test_config};

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::health::configure_routes)
                .configure(routes::monitors::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn health_endpoint_is_up_without_upstream() {
    // No mock upstream at all: health must not depend on it.
    let state = app_state(test_config("http://127.0.0.1:1"));
    let app = test_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.get("status").unwrap(), "healthy");
}

#[actix_web::test]
async fn monitors_endpoint_returns_normalized_list_with_cache_headers() {
    let upstream = mock_upstream().await;
    let state = app_state(test_config(&upstream.uri()));
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/monitors").to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let cache_control = resp
        .headers()
        .get("Cache-Control")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(cache_control, "public, max-age=30, stale-while-revalidate=300");

    let body: Value = test::read_body_json(resp).await;
    let monitors = body.get("monitors").unwrap().as_array().unwrap();
    assert_eq!(monitors.len(), 2);

    let website = &monitors[0];
    assert_eq!(website.get("status").unwrap(), "operational");
    assert_eq!(website.get("responseTime").unwrap(), 150.0);
    assert_eq!(website.get("hasAgent").unwrap(), false);

    let node = &monitors[1];
    assert_eq!(node.get("category").unwrap(), "Nodes");
    assert_eq!(node.get("hasAgent").unwrap(), true);
}

#[actix_web::test]
async fn single_monitor_endpoint_returns_one_record() {
    let upstream = mock_upstream().await;
    let state = app_state(test_config(&upstream.uri()));
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/monitors/node-1")
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.get("name").unwrap(), "App Server");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/monitors/nope")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "not-found");
}

#[actix_web::test]
async fn stats_endpoint_serves_agent_stats() {
    let upstream = mock_upstream().await;
    let state = app_state(test_config(&upstream.uri()));
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/monitors/node-1/stats")
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.get("status").unwrap(), "success");
    let data = body.get("data").unwrap();
    assert_eq!(data.get("cpu").unwrap(), 12.5);
    assert_eq!(data["network"]["in"], 1.5);
}

#[actix_web::test]
async fn stats_endpoint_signals_missing_agent_distinctly() {
    let upstream = mock_upstream().await;
    let state = app_state(test_config(&upstream.uri()));
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/monitors/web-1/stats")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 404);
    assert_eq!(
        resp.headers().get("Cache-Control").unwrap().to_str().unwrap(),
        "public, max-age=300"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "no-agent");
}

#[actix_web::test]
async fn disabled_stats_flag_short_circuits_the_stats_route() {
    // Upstream would answer, but the flag must prevent the call entirely;
    // an unroutable base URL makes any upstream attempt fail loudly.
    let mut config = test_config("http://127.0.0.1:1");
    config.stats.system = false;
    let state = app_state(config);
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/monitors/node-1/stats")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 404);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.get("error").unwrap(), "stats-disabled");
}

#[actix_web::test]
async fn per_category_flags_blank_fields() {
    let upstream = mock_upstream().await;
    let mut config = test_config(&upstream.uri());
    config.stats.network = false;
    config.stats.disk = false;
    let state = app_state(config);
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/monitors/node-1/stats")
            .to_request(),
    )
    .await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    let data = body.get("data").unwrap();
    assert!(data.get("cpu").is_some());
    assert!(data.get("ram").is_some());
    assert!(data.get("disk").is_none());
    assert!(data.get("network").is_none());
}

#[actix_web::test]
async fn refresh_endpoint_returns_the_refreshed_list() {
    let upstream = mock_upstream().await;
    let state = app_state(test_config(&upstream.uri()));
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post().uri("/api/refresh").to_request(),
    )
    .await;
    assert!(resp.status().is_success());
    assert_eq!(
        resp.headers().get("Cache-Control").unwrap().to_str().unwrap(),
        "no-store"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.get("monitors").unwrap().as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn upstream_outage_without_cache_maps_to_bad_gateway() {
    // Nothing is listening on this port, so the first fetch fails with a
    // network error and no cached data exists to absorb it.
    let state = app_state(test_config("http://127.0.0.1:1"));
    let app = test_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/monitors").to_request(),
    )
    .await;
    assert_eq!(resp.status().as_u16(), 502);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "network-error");
}
