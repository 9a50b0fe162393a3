//! Request correlation.
//!
//! # Responsibilities
//! - Read the inbound request-id header; generate a lowercase UUID if absent
//! - Store a `RequestContext` as a request extension for handlers/services
//! - Open a tracing span so every log line carries the request id
//! - Echo the id back in the response header, after metrics are recorded
//!
//! # Design Decisions
//! - The context is an explicit value threaded through the request, not
//!   ambient global state; it never outlives its request.
//! - Strict retrieval (extractor) fails with an internal error when the
//!   middleware did not run; lenient retrieval yields an empty id so
//!   best-effort tracing never fails a request.

use std::time::Instant;

use axum::extract::{FromRequestParts, MatchedPath, Request, State};
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::request::Parts;
use axum::http::Extensions;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Per-request correlation context. Created at request entry, dropped at
/// request exit; never shared across requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlation id: propagated from the inbound header or generated.
    pub id: String,
    /// Monotonic start timestamp.
    pub start: Instant,
    /// Matched route pattern, when the request hit a known route.
    pub route: Option<String>,
}

impl RequestContext {
    pub fn new(id: impl Into<String>, route: Option<String>) -> Self {
        Self {
            id: id.into(),
            start: Instant::now(),
            route,
        }
    }

    /// Strict retrieval: absence of a context is an internal error.
    pub fn from_extensions(extensions: &Extensions) -> Result<&Self, ApiError> {
        extensions
            .get::<Self>()
            .ok_or_else(|| ApiError::internal("Getting request id failed"))
    }

    /// Lenient retrieval for best-effort tracing: absence yields "".
    pub fn id_or_empty(extensions: &Extensions) -> String {
        extensions
            .get::<Self>()
            .map(|ctx| ctx.id.clone())
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        RequestContext::from_extensions(&parts.extensions).cloned()
    }
}

/// Generates a new lowercase correlation id.
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Correlation middleware: assigns the request id, opens the request span
/// and echoes the id header on the way out.
pub async fn propagate_request_id(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header_name = state.config.headers.request_id.clone();

    let id = request
        .headers()
        .get(header_name.as_str())
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(new_request_id);

    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned());

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    request
        .extensions_mut()
        .insert(RequestContext::new(id.clone(), route));

    tracing::info!(
        request_id = %id,
        method = %method,
        path = %path,
        "incoming request"
    );

    let span = tracing::info_span!("request", request_id = %id);
    let mut response = next.run(request).instrument(span).await;

    if let (Ok(name), Ok(value)) = (
        HeaderName::from_bytes(header_name.as_bytes()),
        HeaderValue::from_str(&id),
    ) {
        response.headers_mut().insert(name, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_id_is_lowercase_and_unique() {
        let first = new_request_id();
        let second = new_request_id();
        assert_ne!(first, second);
        assert!(!first.is_empty());
        assert_eq!(first, first.to_lowercase());
    }

    #[test]
    fn test_strict_retrieval_fails_without_context() {
        let extensions = Extensions::new();
        let err = RequestContext::from_extensions(&extensions).unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_lenient_retrieval_yields_empty_id() {
        let extensions = Extensions::new();
        assert_eq!(RequestContext::id_or_empty(&extensions), "");
    }

    #[test]
    fn test_retrieval_roundtrip() {
        let mut extensions = Extensions::new();
        extensions.insert(RequestContext::new("abc123", None));
        let ctx = RequestContext::from_extensions(&extensions).unwrap();
        assert_eq!(ctx.id, "abc123");
        assert_eq!(RequestContext::id_or_empty(&extensions), "abc123");
    }
}
