//! Health check aggregation.
//!
//! Probes checked dependencies (currently only storage connectivity) on
//! demand and folds them into a single UP/DOWN report. Any failing
//! dependency takes the overall status DOWN.

use serde::Serialize;

use crate::repository::TextRepository;

/// Subsystem status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

/// Aggregated health report: `{"status": "UP", "db": "UP"}`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: Status,
    pub db: Status,
}

impl HealthReport {
    pub fn is_up(&self) -> bool {
        self.status == Status::Up
    }
}

/// Runs all dependency probes synchronously and aggregates the result.
pub async fn check(repository: &dyn TextRepository) -> HealthReport {
    let db = match repository.ping().await {
        Ok(()) => Status::Up,
        Err(err) => {
            tracing::error!(error = %err, "database health check failed");
            Status::Down
        }
    };

    HealthReport { status: db, db }
}
