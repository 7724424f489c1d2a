use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::state::AppState;

// GET /api/health - cached CDN probe results for the status display
pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cdn = state.cdn_health.status().await;
    let status = if cdn.all_healthy() { "healthy" } else { "degraded" };

    Json(serde_json::json!({
        "status": status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "cdn": cdn,
    }))
}
