use std::sync::Arc;
use std::time::Duration;

use crate::health::CdnHealth;
use crate::rate_limit::RateLimitStore;

// app's shared state
pub struct AppState {
    pub client: reqwest::Client,
    pub rate_limiter: Arc<dyn RateLimitStore>,
    pub allowed_domains: Vec<String>, // immutable after startup
    pub fetch_timeout: Duration,
    pub max_download_bytes: u64,
    pub cdn_health: CdnHealth,
}
