use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use asset_gateway::app;
use asset_gateway::config::Args;
use asset_gateway::health::CdnHealth;
use asset_gateway::proxy::MAX_DOWNLOAD_BYTES;
use asset_gateway::rate_limit::{InMemoryRateLimiter, RateLimitStore, eviction_sweeper};
use asset_gateway::state::AppState;
use asset_gateway::validate::{ALLOWED_DOMAINS, default_allowed_domains};

#[tokio::main]
async fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // parse cli arguments
    let args = Args::parse();

    let client = reqwest::Client::new();
    let rate_limiter: Arc<dyn RateLimitStore> = Arc::new(InMemoryRateLimiter::new(
        args.rate_limit,
        Duration::from_secs(args.rate_window),
    ));

    // creating shared state
    let state = Arc::new(AppState {
        client: client.clone(),
        rate_limiter: Arc::clone(&rate_limiter),
        allowed_domains: default_allowed_domains(),
        fetch_timeout: Duration::from_secs(args.fetch_timeout),
        max_download_bytes: MAX_DOWNLOAD_BYTES,
        cdn_health: CdnHealth::new(client, Duration::from_secs(args.health_cache)),
    });

    // background eviction keeps the quota table bounded
    tokio::spawn(eviction_sweeper(
        rate_limiter,
        Duration::from_secs(args.sweep_interval),
    ));

    let app = app(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("Gateway running on http://localhost:{}", args.port);
    info!("Allowed CDN domains: {:?}", ALLOWED_DOMAINS);
    info!(
        "Rate limit: {} requests per {} seconds",
        args.rate_limit, args.rate_window
    );
    axum::serve(listener, app).await.unwrap();
}
