//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal config is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the text service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Inbound header names.
    pub headers: HeaderConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Storage settings.
    pub storage: StorageConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Names of the headers the service reads and echoes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Header carrying the requested language tag. Required on text routes.
    pub language: String,

    /// Correlation id header, propagated or generated, echoed on responses.
    pub request_id: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            language: "Accept-Language".to_string(),
            request_id: "X-Request-ID".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Whether the metrics recorder and `/metrics` route are active.
    pub metrics_enabled: bool,

    /// Route patterns excluded from request counting and latency recording.
    pub excluded_routes: Vec<String>,
}

impl ObservabilityConfig {
    /// Returns true if the route pattern is excluded from request metrics.
    pub fn is_excluded(&self, route: &str) -> bool {
        self.excluded_routes.iter().any(|r| r == route)
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            excluded_routes: vec!["/metrics".to_string(), "/health".to_string()],
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub mode: StorageMode,
}

/// Supported storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// In-memory store, seeded at startup. Used for local runs and tests.
    #[default]
    Memory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.headers.language, "Accept-Language");
        assert_eq!(config.headers.request_id, "X-Request-ID");
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(config.observability.metrics_enabled);
        assert!(config.observability.is_excluded("/metrics"));
        assert!(config.observability.is_excluded("/health"));
        assert_eq!(config.storage.mode, StorageMode::Memory);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.observability.is_excluded("/metrics"));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [headers]
            language = "X-Language"

            [observability]
            excluded_routes = ["/metrics", "/health"]

            [storage]
            mode = "memory"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.headers.language, "X-Language");
        // Untouched sections keep their defaults.
        assert_eq!(config.headers.request_id, "X-Request-ID");
        assert!(config.observability.is_excluded("/health"));
    }

    #[test]
    fn test_is_excluded_exact_match_only() {
        let config = ObservabilityConfig::default();
        assert!(config.is_excluded("/metrics"));
        assert!(!config.is_excluded("/metrics/x"));
        assert!(!config.is_excluded("/v1/texts/key/{key}"));
    }
}
