//! Route handlers.
//!
//! Handlers parse parameters and required headers, delegate to the text
//! service and shape the outcome; all cross-cutting concerns (correlation,
//! metrics) live in the observability layers around them.

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};

use crate::health;
use crate::http::error::{ApiError, ApiResult};
use crate::http::response::{health_response, texts_response};
use crate::http::server::AppState;
use crate::observability::metrics::PROMETHEUS_CONTENT_TYPE;
use crate::observability::RequestContext;

/// `GET /v1/texts/key/{key}`
pub async fn get_text_by_key(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let language = require_language(&state, &headers, &ctx)?;
    let texts = state.service.get_text_by_key(&ctx, &key, &language).await?;
    Ok(texts_response(texts))
}

/// `GET /v1/texts/group/{group_id}`
pub async fn get_text_by_group(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(group_id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let language = require_language(&state, &headers, &ctx)?;
    let texts = state
        .service
        .get_text_by_group(&ctx, &group_id, &language)
        .await?;
    Ok(texts_response(texts))
}

/// `GET /health`
pub async fn check_health(State(state): State<AppState>) -> Response {
    let report = health::check(state.repository.as_ref()).await;
    health_response(report)
}

/// `GET /metrics` — Prometheus text exposition. Excluded from request
/// metrics by default.
pub async fn metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
            handle.render(),
        )
            .into_response(),
        None => ApiError::not_found("Metrics are disabled").into_response(),
    }
}

/// Fallback for unmatched routes.
pub async fn fallback_not_found() -> ApiError {
    ApiError::not_found("Not found")
}

/// Fallback for matched routes with an unsupported verb.
pub async fn fallback_method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Reads the required language header; its absence is a client error raised
/// before any lookup happens.
fn require_language(
    state: &AppState,
    headers: &HeaderMap,
    ctx: &RequestContext,
) -> ApiResult<String> {
    headers
        .get(state.config.headers.language.as_str())
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| {
            ApiError::bad_request("No language specified").with_request_id(&ctx.id)
        })
}
