//! API error handling
//!
//! Error responses mirror the proxy's wire contract: a JSON object with an
//! `error` message and, for upstream failures, a `details` field carrying
//! whatever the upstream returned.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server started without an upstream access key
    #[error("Missing WEATHERDECK_UPSTREAM_API_KEY on the server.")]
    MissingApiKey,

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {status}")]
    Upstream {
        status: u16,
        details: serde_json::Value,
    },

    /// Request to the upstream never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// No route matched the request
    #[error("Route not found")]
    NotFound,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Upstream response body or transport failure detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

const FETCH_FAILED: &str = "Unable to fetch data from Weatherstack.";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: self.to_string(),
                    details: None,
                },
            ),
            Self::Upstream { status, details } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                ErrorResponse {
                    error: FETCH_FAILED.to_string(),
                    details: Some(details),
                },
            ),
            Self::Transport(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: FETCH_FAILED.to_string(),
                    details: Some(serde_json::Value::String(message)),
                },
            ),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Route not found".to_string(),
                    details: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
