//! Request-handling error taxonomy and HTTP response mapping.
//!
//! # Design Decisions
//! - Every failure that reaches the boundary is one of these kinds;
//!   anything else is coerced to an internal error with no detail leaked.
//! - 4xx errors are expected, client-caused, and logged at info level;
//!   5xx errors are logged at error level with the request id when known.
//! - The body shape is fixed: `{"status": <int>, "code": <str>, "message": <str>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result alias for handlers and services.
pub type ApiResult<T> = Result<T, ApiError>;

/// Structured JSON error body.
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// Stable machine-readable error code.
    pub code: &'static str,
    /// Human-readable message (safe for clients).
    pub message: String,
}

/// HTTP API error with a stable machine-readable code.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    request_id: Option<String>,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            request_id: None,
        }
    }

    /// Invalid client input, e.g. a missing required header or an
    /// unsupported language tag.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Missing key, group or route.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Route exists but does not support the request verb.
    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "METHOD_NOT_ALLOWED",
            "Method not allowed",
        )
    }

    /// Unexpected failure. The message is sent to the client, so callers
    /// must keep internal detail out of it.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_SERVER_ERROR",
            message,
        )
    }

    /// A dependency or health check failed.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            message,
        )
    }

    /// Attaches a request id for log correlation. Not serialized to the body.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn body(&self) -> ApiErrorBody {
        ApiErrorBody {
            status: self.status.as_u16(),
            code: self.code,
            message: self.message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = self.request_id.as_deref().unwrap_or("");
        if self.status.is_server_error() {
            tracing::error!(
                status = self.status.as_u16(),
                code = self.code,
                message = %self.message,
                request_id = %request_id,
                "request failed"
            );
        } else {
            tracing::info!(
                status = self.status.as_u16(),
                code = self.code,
                message = %self.message,
                request_id = %request_id,
                "request rejected"
            );
        }

        (self.status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::bad_request("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("x").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::method_not_allowed().status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::internal("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::service_unavailable("x").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_stable_codes() {
        assert_eq!(ApiError::bad_request("x").code(), "BAD_REQUEST");
        assert_eq!(ApiError::not_found("x").code(), "NOT_FOUND");
        assert_eq!(
            ApiError::method_not_allowed().code(),
            "METHOD_NOT_ALLOWED"
        );
        assert_eq!(ApiError::internal("x").code(), "INTERNAL_SERVER_ERROR");
        assert_eq!(
            ApiError::service_unavailable("x").code(),
            "SERVICE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_body_shape() {
        let err = ApiError::bad_request("No language specified");
        let json = serde_json::to_value(err.body()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": 400,
                "code": "BAD_REQUEST",
                "message": "No language specified",
            })
        );
    }

    #[test]
    fn test_request_id_stays_out_of_body() {
        let err = ApiError::internal("boom").with_request_id("abc123");
        let json = serde_json::to_value(err.body()).unwrap();
        assert!(json.get("request_id").is_none());
    }
}
