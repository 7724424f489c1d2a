//! Shared helpers for the integration tests: build an AppState and run the
//! real router on an ephemeral port.

use std::sync::Arc;
use std::time::Duration;

use asset_gateway::app;
use asset_gateway::health::CdnHealth;
use asset_gateway::proxy::MAX_DOWNLOAD_BYTES;
use asset_gateway::rate_limit::InMemoryRateLimiter;
use asset_gateway::state::AppState;

pub struct GatewayConfig {
    pub allowed_domains: Vec<String>,
    pub rate_limit: u32,
    pub rate_window: Duration,
    pub fetch_timeout: Duration,
    pub max_download_bytes: u64,
    // (logo, palette) probe URLs; None keeps the production CDN URLs
    pub health_probe_urls: Option<(String, String)>,
    pub health_cache_ttl: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            // wiremock origins bind to loopback
            allowed_domains: vec!["127.0.0.1".to_string()],
            rate_limit: 10,
            rate_window: Duration::from_secs(60),
            fetch_timeout: Duration::from_secs(5),
            max_download_bytes: MAX_DOWNLOAD_BYTES,
            health_probe_urls: None,
            health_cache_ttl: Duration::from_secs(300),
        }
    }
}

pub async fn spawn_gateway(config: GatewayConfig) -> String {
    let client = reqwest::Client::new();
    let cdn_health = match config.health_probe_urls {
        Some((logo, palette)) => {
            CdnHealth::with_probe_urls(client.clone(), config.health_cache_ttl, logo, palette)
        }
        None => CdnHealth::new(client.clone(), config.health_cache_ttl),
    };

    let state = Arc::new(AppState {
        client,
        rate_limiter: Arc::new(InMemoryRateLimiter::new(
            config.rate_limit,
            config.rate_window,
        )),
        allowed_domains: config.allowed_domains,
        fetch_timeout: config.fetch_timeout,
        max_download_bytes: config.max_download_bytes,
        cdn_health,
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });

    format!("http://{addr}")
}
