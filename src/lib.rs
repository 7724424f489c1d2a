use std::sync::Arc;

use axum::{Router, routing::get};

pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod models;
pub mod proxy;
pub mod rate_limit;
pub mod state;
pub mod validate;

use state::AppState;

// router is built here so the integration tests can run the exact same app
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/download", get(handlers::download_handler))
        .route("/api/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
