//! Tests for /api/health and the CDN probe cache.

mod support;

use std::time::Duration;

use support::{GatewayConfig, spawn_gateway};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn probe_origin(logo_status: u16, palette_status: u16, expected_probes: u64) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(logo_status))
        .expect(expected_probes)
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/palette.png"))
        .respond_with(ResponseTemplate::new(palette_status))
        .expect(expected_probes)
        .mount(&server)
        .await;

    server
}

fn config_for(origin: &MockServer, cache_ttl: Duration) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.health_probe_urls = Some((
        format!("{}/logo.png", origin.uri()),
        format!("{}/palette.png", origin.uri()),
    ));
    config.health_cache_ttl = cache_ttl;
    config
}

#[tokio::test]
async fn reports_healthy_when_both_probes_pass() {
    let origin = probe_origin(200, 200, 1).await;
    let base = spawn_gateway(config_for(&origin, Duration::from_secs(300))).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cdn"]["logos"]["healthy"], true);
    assert_eq!(body["cdn"]["color_palette"]["healthy"], true);
    assert!(body["cdn"]["logos"]["response_time_ms"].is_u64());
    assert!(body["cdn"]["logos"]["last_checked"].is_string());
}

#[tokio::test]
async fn reports_degraded_with_probe_error_details() {
    let origin = probe_origin(200, 503, 1).await;
    let base = spawn_gateway(config_for(&origin, Duration::from_secs(300))).await;

    let body: serde_json::Value = reqwest::Client::new()
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "degraded");
    assert_eq!(body["cdn"]["logos"]["healthy"], true);
    assert_eq!(body["cdn"]["color_palette"]["healthy"], false);
    let error = body["cdn"]["color_palette"]["error"].as_str().unwrap();
    assert!(error.contains("503"), "unexpected probe error: {error}");
}

#[tokio::test]
async fn probe_results_are_cached_within_the_ttl() {
    // expect(1): a second probe within the TTL would fail verification
    let origin = probe_origin(200, 200, 1).await;
    let base = spawn_gateway(config_for(&origin, Duration::from_secs(300))).await;
    let client = reqwest::Client::new();

    let first: serde_json::Value = client
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: serde_json::Value = client
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // same cached probe pair, down to the timestamps
    assert_eq!(first["cdn"], second["cdn"]);

    origin.verify().await;
}

#[tokio::test]
async fn probes_run_again_after_the_ttl_expires() {
    let origin = probe_origin(200, 200, 2).await;
    let base = spawn_gateway(config_for(&origin, Duration::from_millis(100))).await;
    let client = reqwest::Client::new();

    let first = client
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 200);

    tokio::time::sleep(Duration::from_millis(150)).await;

    let second = client
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 200);

    origin.verify().await;
}

#[tokio::test]
async fn unreachable_probe_target_reports_unhealthy() {
    // nothing listens on this port once the server is dropped
    let origin = MockServer::start().await;
    let config = config_for(&origin, Duration::from_secs(300));
    drop(origin);

    let base = spawn_gateway(config).await;
    let body: serde_json::Value = reqwest::Client::new()
        .get(format!("{base}/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "degraded");
    assert_eq!(body["cdn"]["logos"]["healthy"], false);
    assert!(body["cdn"]["logos"]["error"].is_string());
}
