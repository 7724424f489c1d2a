mod download;
mod health;
mod metrics;

pub use download::download_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
