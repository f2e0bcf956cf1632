//! Error types for the gateway service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur while proxying a request to the origin.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No origin is configured; proxied paths have nowhere to go.
    #[error("Not found")]
    NoOrigin,

    /// Reading the inbound request body failed.
    #[error("invalid request body: {0}")]
    Body(#[from] axum::Error),

    /// The origin could not be reached or failed mid-transfer.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NoOrigin => StatusCode::NOT_FOUND,
            Self::Body(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        (status, self.to_string()).into_response()
    }
}
