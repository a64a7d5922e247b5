//! HTTP-facing error type.
//!
//! Handlers log internal details and return user-safe messages.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::fmt;

/// Shown when the geocoder has no match.
pub const LOCATION_NOT_FOUND: &str = "Location not found in India. Please try again.";

/// Errors returned by API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request was malformed.
    InvalidInput { reason: String },
    /// No live chat session for the request's cookie.
    SessionNotFound,
    /// The searched location could not be geocoded.
    LocationNotFound,
    /// Too many lookups in a short time; nothing failed upstream.
    RateLimited { retry_after_ms: u64 },
    /// An upstream lookup service failed.
    Upstream { details: String },
    /// Anything else; details are logged, never returned.
    Internal { details: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
            Self::SessionNotFound => write!(f, "chat session not found"),
            Self::LocationNotFound => write!(f, "location not found"),
            Self::RateLimited { retry_after_ms } => {
                write!(f, "rate limited, retry after {retry_after_ms}ms")
            }
            Self::Upstream { details } => write!(f, "upstream lookup failed: {details}"),
            Self::Internal { details } => write!(f, "internal error: {details}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::RateLimited { retry_after_ms } = self {
            let retry_after_secs = retry_after_ms.div_ceil(1000).max(1);
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "Too many searches. Please wait a moment and try again.",
                    "retry_after_ms": retry_after_ms,
                })),
            )
                .into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
            return response;
        }

        let (status, message) = match &self {
            Self::InvalidInput { reason } => (StatusCode::BAD_REQUEST, reason.clone()),
            Self::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "Chat session not found".to_string(),
            ),
            Self::LocationNotFound => (StatusCode::NOT_FOUND, LOCATION_NOT_FOUND.to_string()),
            Self::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many searches. Please wait a moment and try again.".to_string(),
            ),
            Self::Upstream { details } => {
                tracing::error!(details = %details, "resource lookup failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Could not reach the resource lookup service. Please try again.".to_string(),
                )
            }
            Self::Internal { details } => {
                tracing::error!(details = %details, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
