//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → observability layers (correlation id, timer)
//!     → server.rs (Axum routing)
//!     → handlers.rs (parse params/headers, call the text service)
//!     → response.rs / error.rs (uniform success/error shaping)
//!     → observability layers (count, latency, id echo)
//!     → send to client
//! ```

pub mod error;
pub mod handlers;
pub mod response;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use server::HttpServer;
