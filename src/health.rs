use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::{CdnStatus, ProbeResult};

// Fixed CDN assets probed for the status display
pub const LOGO_PROBE_URL: &str =
    "https://cdn.slateai.org/Logos/FINAL/centered/slate-logo-obsidian-gemini-centered-v1.png";
pub const PALETTE_PROBE_URL: &str =
    "https://cdn.slateai.org/Color%20Palettes/SlateAI%20Color%20Palette%20v0.2.png";

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

struct CachedStatus {
    status: CdnStatus,
    fetched_at: Instant,
}

// Timestamp-gated CDN health cache. HEAD probes run at most once per TTL;
// the lock is held across a refresh so concurrent callers share one probe
// pair instead of stampeding the CDN.
pub struct CdnHealth {
    client: Client,
    logo_url: String,
    palette_url: String,
    cache_ttl: Duration,
    cached: Mutex<Option<CachedStatus>>,
}

impl CdnHealth {
    pub fn new(client: Client, cache_ttl: Duration) -> Self {
        Self::with_probe_urls(
            client,
            cache_ttl,
            LOGO_PROBE_URL.to_string(),
            PALETTE_PROBE_URL.to_string(),
        )
    }

    pub fn with_probe_urls(
        client: Client,
        cache_ttl: Duration,
        logo_url: String,
        palette_url: String,
    ) -> Self {
        Self {
            client,
            logo_url,
            palette_url,
            cache_ttl,
            cached: Mutex::new(None),
        }
    }

    pub async fn status(&self) -> CdnStatus {
        let mut cached = self.cached.lock().await;
        if let Some(entry) = cached.as_ref() {
            if entry.fetched_at.elapsed() < self.cache_ttl {
                debug!("CDN health cache hit");
                return entry.status.clone();
            }
        }

        let (logos, color_palette) =
            tokio::join!(self.probe(&self.logo_url), self.probe(&self.palette_url));
        let status = CdnStatus {
            logos,
            color_palette,
        };
        if !status.all_healthy() {
            warn!("CDN health probes report degraded status");
        }

        *cached = Some(CachedStatus {
            status: status.clone(),
            fetched_at: Instant::now(),
        });
        status
    }

    async fn probe(&self, url: &str) -> ProbeResult {
        let start = Instant::now();
        let result = self.client.head(url).timeout(PROBE_TIMEOUT).send().await;
        let response_time_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) if response.status().is_success() => ProbeResult {
                healthy: true,
                response_time_ms: Some(response_time_ms),
                error: None,
                last_checked: Utc::now(),
            },
            Ok(response) => ProbeResult {
                healthy: false,
                response_time_ms: Some(response_time_ms),
                error: Some(format!("HTTP {}", response.status())),
                last_checked: Utc::now(),
            },
            Err(e) => ProbeResult {
                healthy: false,
                response_time_ms: Some(response_time_ms),
                error: Some(if e.is_timeout() {
                    "probe timed out".to_string()
                } else {
                    "network error".to_string()
                }),
                last_checked: Utc::now(),
            },
        }
    }
}
