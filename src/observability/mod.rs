//! Observability subsystem: request correlation and metrics.
//!
//! # Data Flow
//! ```text
//! request in
//!     → request_id.rs (assign/propagate correlation id, open span)
//!     → metrics.rs    (start timer)
//!     → handlers/service (logs carry the request id via the span)
//! response out
//!     → metrics.rs    (record count, then latency, keyed by route pattern)
//!     → request_id.rs (echo correlation id header)
//! ```
//!
//! # Design Decisions
//! - Correlation state is an explicit per-request value, never a global
//! - Metrics are cheap atomic updates against a process-wide recorder
//! - The metrics route itself is excluded from request metrics

pub mod metrics;
pub mod request_id;

pub use request_id::RequestContext;
