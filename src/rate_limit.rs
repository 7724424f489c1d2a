use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use dashmap::DashMap;
use tracing::debug;

use crate::metrics::RATE_LIMIT_KEYS;

// Rate limit entry - tracks requests per client key
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
}

// Quota store behind the download handler. In-memory by default; a
// shared/external store can be swapped in without touching handler logic.
pub trait RateLimitStore: Send + Sync {
    // true = request admitted (and counted)
    fn try_acquire(&self, key: &str) -> bool;

    // drop entries whose window has already lapsed
    fn evict_expired(&self);

    fn tracked_keys(&self) -> usize;
}

// Per-key counters over a rolling (non-sliding) window. The DashMap entry
// lock makes each check-and-increment atomic per key; quota is still
// per-process only.
pub struct InMemoryRateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    limit: u32,
    window: Duration,
}

impl InMemoryRateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            window,
        }
    }
}

impl RateLimitStore for InMemoryRateLimiter {
    fn try_acquire(&self, key: &str) -> bool {
        let now = Instant::now();

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // window expired? roll it forward and start counting at 1
        if entry.window_start.elapsed() > self.window {
            entry.count = 1;
            entry.window_start = now;
            return true;
        }

        if entry.count < self.limit {
            entry.count += 1;
            return true;
        }

        false
    }

    fn evict_expired(&self) {
        self.entries
            .retain(|_, entry| entry.window_start.elapsed() <= self.window);
    }

    fn tracked_keys(&self) -> usize {
        self.entries.len()
    }
}

// Client key for quota accounting: first X-Forwarded-For hop, then
// X-Real-IP, then a shared "unknown" bucket.
pub fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            return first.trim().to_string();
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// Periodic eviction keeps the key set bounded
pub async fn eviction_sweeper(store: Arc<dyn RateLimitStore>, every: Duration) {
    let mut interval = tokio::time::interval(every);

    loop {
        interval.tick().await;
        store.evict_expired();
        let tracked = store.tracked_keys();
        RATE_LIMIT_KEYS.set(tracked as f64);
        debug!(tracked, "rate limit eviction sweep");
    }
}
