use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use tracing::{debug, info, warn};

use crate::error::ProxyError;
use crate::metrics::{RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::DownloadQuery;
use crate::proxy::fetch_asset;
use crate::rate_limit::client_key;
use crate::state::AppState;
use crate::validate::{is_allowed_domain, is_valid_filename};

// GET /api/download?url=..&filename=..
//
// Check order is fixed: quota, presence, domain, filename, then the single
// outbound fetch. First violation wins.
pub async fn download_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ProxyError> {
    REQUEST_TOTAL.inc();
    let start = Instant::now();

    let key = client_key(&headers);
    if !state.rate_limiter.try_acquire(&key) {
        RATE_LIMITED_TOTAL.inc();
        warn!(%key, "rate limit exceeded");
        return Err(ProxyError::RateLimited);
    }

    let (url, filename) = match (query.url, query.filename) {
        (Some(url), Some(filename)) => (url, filename),
        _ => return Err(ProxyError::MissingParams),
    };

    if !is_allowed_domain(&url, &state.allowed_domains) {
        warn!(%url, "URL outside the CDN allow-list");
        return Err(ProxyError::DomainNotAllowed);
    }

    if !is_valid_filename(&filename) {
        debug!(%filename, "rejected filename");
        return Err(ProxyError::InvalidFilename);
    }

    let asset = fetch_asset(
        &state.client,
        &url,
        state.fetch_timeout,
        state.max_download_bytes,
    )
    .await?;

    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());
    let length = asset.body.len();
    info!(%url, %filename, bytes = length, "asset proxied");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, asset.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .header(header::CONTENT_LENGTH, length)
        .header(header::CACHE_CONTROL, "public, max-age=3600")
        .body(Body::from(asset.body))
        .map_err(|_| ProxyError::Internal)
}
