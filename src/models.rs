use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Query parameters for /api/download. Both are required; presence is
// checked in the handler (after the rate limit) so a bare request still
// spends quota before it is rejected.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub url: Option<String>,
    pub filename: Option<String>,
}

// Outcome of one HEAD probe against a CDN asset
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub last_checked: DateTime<Utc>,
}

// Aggregate CDN status reported by /api/health
#[derive(Debug, Clone, Serialize)]
pub struct CdnStatus {
    pub logos: ProbeResult,
    pub color_palette: ProbeResult,
}

impl CdnStatus {
    pub fn all_healthy(&self) -> bool {
        self.logos.healthy && self.color_palette.healthy
    }
}
