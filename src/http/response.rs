//! Uniform response shaping.
//!
//! # Design Decisions
//! - Successful lookups serialize directly as the returned `{key: value}`
//!   map with status 200; no wrapper object
//! - Errors serialize through `ApiError` with the mapped status code
//! - Correlation headers and metrics are attached by the observability
//!   layers, not here

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::health::HealthReport;
use crate::models::Texts;

/// 200 response with the lookup result as a flat JSON map.
pub fn texts_response(texts: Texts) -> Response {
    Json(texts).into_response()
}

/// Health report response: 200 when everything is UP, 503 otherwise.
pub fn health_response(report: HealthReport) -> Response {
    let status = if report.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}
