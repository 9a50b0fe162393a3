//! Metrics collection and Prometheus exposition.
//!
//! # Metrics
//! - `http_requests_total` (counter): requests by method, endpoint, status
//! - `http_request_latency_ms` (histogram): latency in fractional
//!   milliseconds, rounded to two decimals
//! - `app_info` (gauge): constant 1, labelled with name and version
//!
//! # Design Decisions
//! - The endpoint label is the matched route pattern, never interpolated
//!   parameter values, to keep label cardinality bounded.
//! - A configurable route set (at minimum `/metrics`) is excluded from
//!   counting and timing to avoid self-measurement skew.
//! - The counter layer sits inside the latency layer, which sits inside the
//!   correlation layer: on the response path the count is recorded first,
//!   then the latency, then the id header is appended.

use std::sync::OnceLock;
use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::http::server::AppState;

/// Request counter, labelled by method, endpoint and status code.
pub const REQUESTS_TOTAL: &str = "http_requests_total";

/// Request latency histogram in milliseconds, labelled by method and endpoint.
pub const REQUEST_LATENCY_MS: &str = "http_request_latency_ms";

/// Content type of the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Endpoint label used when no route matched.
const UNMATCHED_ENDPOINT: &str = "NOT_FOUND";

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the process-wide metrics recorder and returns the exposition
/// handle. Safe to call multiple times; subsequent calls are no-ops.
///
/// # Panics
///
/// Panics if the Prometheus recorder cannot be installed; the server should
/// not start without its metrics pipeline.
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .unwrap_or_else(|e| panic!("failed to install prometheus recorder: {e}"));

            describe_counter!(REQUESTS_TOTAL, "Service request count");
            describe_histogram!(REQUEST_LATENCY_MS, "Request latency in milliseconds");

            let info_labels = [
                ("name", env!("CARGO_PKG_NAME")),
                ("version", env!("CARGO_PKG_VERSION")),
            ];
            gauge!("app_info", &info_labels).set(1.0);

            tracing::info!("Prometheus metrics recorder initialized");
            handle
        })
        .clone()
}

/// Returns the matched route pattern for a request, or the unmatched label.
pub fn endpoint_label<B>(request: &axum::http::Request<B>) -> String {
    request.extensions().get::<MatchedPath>().map_or_else(
        || UNMATCHED_ENDPOINT.to_string(),
        |path| path.as_str().to_string(),
    )
}

/// Middleware that counts requests once the final status is known.
pub async fn record_request_count(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().to_string();
    let endpoint = endpoint_label(&request);

    let response = next.run(request).await;

    if !state.config.observability.is_excluded(&endpoint) {
        let labels = [
            ("method", method),
            ("endpoint", endpoint),
            ("http_status", response.status().as_u16().to_string()),
        ];
        counter!(REQUESTS_TOTAL, &labels).increment(1);
    }

    response
}

/// Middleware that records request latency against the matched route.
pub async fn record_latency(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let endpoint = endpoint_label(&request);

    let response = next.run(request).await;

    if !state.config.observability.is_excluded(&endpoint) {
        let labels = [("method", method), ("endpoint", endpoint)];
        histogram!(REQUEST_LATENCY_MS, &labels).record(latency_ms(start));
    }

    response
}

/// Elapsed time since `start` in fractional milliseconds, rounded to two
/// decimal places.
fn latency_ms(start: Instant) -> f64 {
    let millis = start.elapsed().as_secs_f64() * 1e3;
    (millis * 100.0).round() / 100.0
}
