use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

// Everything the download endpoint can fail with. Each variant maps to one
// HTTP status; the display text is exactly what the client sees.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Missing url or filename parameter")]
    MissingParams,

    #[error("Invalid domain. Only SlateAI CDN assets are allowed.")]
    DomainNotAllowed,

    #[error("Invalid filename format")]
    InvalidFilename,

    #[error("File not found on CDN")]
    NotFound,

    #[error("Download timeout. Please try again.")]
    Timeout,

    #[error("Invalid file type")]
    UnsupportedContentType,

    #[error("File too large")]
    PayloadTooLarge,

    #[error("CDN responded with status: {0}")]
    UpstreamStatus(u16),

    #[error("Unable to connect to CDN. Please check your connection.")]
    UpstreamUnreachable,

    #[error("Internal server error. Please try again later.")]
    Internal,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::MissingParams | Self::InvalidFilename | Self::UnsupportedContentType => {
                StatusCode::BAD_REQUEST
            }
            Self::DomainNotAllowed => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UpstreamStatus(_) | Self::UpstreamUnreachable => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Failures always leave as JSON {"error": "..."}, never partial bytes
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
