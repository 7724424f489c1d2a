use std::time::Duration;

use futures_util::StreamExt;
use reqwest::StatusCode;
use reqwest::header;
use tracing::warn;

use crate::error::ProxyError;
use crate::metrics::UPSTREAM_FAILURES;

// User-Agent sent on every outbound CDN request
pub const USER_AGENT: &str = "SlateAI-Brand-Showcase/1.0";

// Hard ceiling on proxied asset size (50 MiB)
pub const MAX_DOWNLOAD_BYTES: u64 = 50 * 1024 * 1024;

pub struct FetchedAsset {
    pub content_type: String,
    pub body: Vec<u8>,
}

fn accepted_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/") || content_type == "application/pdf"
}

// Timeouts get their own status so the caller knows a retry may help
fn classify(err: &reqwest::Error) -> ProxyError {
    if err.is_timeout() {
        ProxyError::Timeout
    } else {
        ProxyError::UpstreamUnreachable
    }
}

// One bounded GET against the CDN, no retries. Origin status, declared
// content type and declared length are checked before any body bytes are
// read; the buffer itself is also capped, so an origin that omits or
// understates Content-Length still cannot push us past the ceiling.
pub async fn fetch_asset(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
    max_bytes: u64,
) -> Result<FetchedAsset, ProxyError> {
    let response = client
        .get(url)
        .header(header::USER_AGENT, USER_AGENT)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| {
            UPSTREAM_FAILURES.inc();
            warn!(%url, error = %e, "CDN fetch failed");
            classify(&e)
        })?;

    let status = response.status();
    if !status.is_success() {
        UPSTREAM_FAILURES.inc();
        warn!(%url, %status, "CDN returned an error status");
        if status == StatusCode::NOT_FOUND {
            return Err(ProxyError::NotFound);
        }
        return Err(ProxyError::UpstreamStatus(status.as_u16()));
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    if !accepted_content_type(&content_type) {
        return Err(ProxyError::UnsupportedContentType);
    }

    if let Some(declared) = response.content_length() {
        if declared > max_bytes {
            return Err(ProxyError::PayloadTooLarge);
        }
    }

    let mut body: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            UPSTREAM_FAILURES.inc();
            warn!(%url, error = %e, "CDN body read failed");
            classify(&e)
        })?;
        if body.len() as u64 + chunk.len() as u64 > max_bytes {
            return Err(ProxyError::PayloadTooLarge);
        }
        body.extend_from_slice(&chunk);
    }

    Ok(FetchedAsset { content_type, body })
}
