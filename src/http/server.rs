//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware in the contracted order (correlation outermost,
//!   then latency, then request counting)
//! - Bind the server to a listener and serve with graceful shutdown
//!
//! # Design Decisions
//! - Shared state is limited to the config, the service, the repository
//!   and the metrics handle, all injected explicitly; no global lookups
//! - Fallbacks produce the same structured error body as handler errors

use std::sync::Arc;
use std::time::Duration;

use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::http::error::ApiError;

use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::observability::metrics::{init_metrics, record_latency, record_request_count};
use crate::observability::request_id::propagate_request_id;
use crate::repository::TextRepository;
use crate::service::TextService;

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub service: Arc<TextService>,
    pub repository: Arc<dyn TextRepository>,
    pub metrics: Option<PrometheusHandle>,
}

/// HTTP server for the text service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and storage.
    pub fn new(config: ServiceConfig, repository: Arc<dyn TextRepository>) -> Self {
        let metrics = config
            .observability
            .metrics_enabled
            .then(init_metrics);

        let state = AppState {
            config: Arc::new(config.clone()),
            service: Arc::new(TextService::new(repository.clone())),
            repository,
            metrics,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layer order matters: later `.layer` calls wrap earlier ones, so the
    /// counter runs closest to the handlers and observes the final status
    /// first on the way out, then the latency recorder, then the
    /// correlation-header echo.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/v1/texts/key/{key}", get(handlers::get_text_by_key))
            .route(
                "/v1/texts/group/{group_id}",
                get(handlers::get_text_by_group),
            )
            .route("/health", get(handlers::check_health))
            .route("/metrics", get(handlers::metrics))
            .fallback(handlers::fallback_not_found)
            .method_not_allowed_fallback(handlers::fallback_method_not_allowed)
            .with_state(state.clone())
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                record_request_count,
            ))
            .layer(middleware::from_fn_with_state(state.clone(), record_latency))
            .layer(middleware::from_fn_with_state(state, propagate_request_id))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Router clone for driving the service in tests without a socket.
    pub fn test_router(&self) -> Router {
        self.router.clone()
    }
}

/// Converts a handler panic into a structured 500. The panic payload is
/// logged, never sent to the client.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");
    ApiError::internal("Internal server error").into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
