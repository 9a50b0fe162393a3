//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parseable)
//! - Check header names are legal HTTP header names
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use axum::http::header::HeaderName;

use crate::config::schema::ServiceConfig;

/// A single semantic configuration problem.
#[derive(Debug)]
pub enum ValidationError {
    InvalidBindAddress(String),
    InvalidHeaderName(&'static str, String),
    InvalidExcludedRoute(String),
    ZeroTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address: {}", addr)
            }
            ValidationError::InvalidHeaderName(field, name) => {
                write!(f, "invalid header name for {}: {}", field, name)
            }
            ValidationError::InvalidExcludedRoute(route) => {
                write!(f, "excluded route must start with '/': {}", route)
            }
            ValidationError::ZeroTimeout => write!(f, "request timeout must be greater than 0"),
        }
    }
}

/// Validates a configuration, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (field, name) in [
        ("headers.language", &config.headers.language),
        ("headers.request_id", &config.headers.request_id),
    ] {
        if HeaderName::from_bytes(name.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidHeaderName(field, name.clone()));
        }
    }

    for route in &config.observability.excluded_routes {
        if !route.starts_with('/') {
            errors.push(ValidationError::InvalidExcludedRoute(route.clone()));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
