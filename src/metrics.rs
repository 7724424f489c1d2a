use lazy_static::lazy_static;
use prometheus::{Counter, Gauge, Histogram, register_counter, register_gauge, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter =
        register_counter!("asset_gateway_requests_total", "Total download requests").unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "asset_gateway_rate_limited_total",
        "Requests rejected by the rate limiter"
    )
    .unwrap();
    pub static ref UPSTREAM_FAILURES: Counter = register_counter!(
        "asset_gateway_upstream_failures_total",
        "Failed or error-status CDN fetches"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "asset_gateway_request_latency_seconds",
        "Download request latency in seconds"
    )
    .unwrap();
    pub static ref RATE_LIMIT_KEYS: Gauge = register_gauge!(
        "asset_gateway_rate_limit_keys",
        "Client keys currently tracked by the rate limiter"
    )
    .unwrap();
}
