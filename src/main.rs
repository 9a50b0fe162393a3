//! Internationalized text retrieval service.
//!
//! Resolves `(text key | text group, language)` into translated strings
//! over a small HTTP API, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 TEXT SERVICE                  │
//!                    │                                               │
//!   Client Request   │  ┌──────────────┐    ┌─────────────────────┐ │
//!   ─────────────────┼─▶│observability │───▶│  http (routing +    │ │
//!                    │  │ id + timer   │    │  handlers)          │ │
//!                    │  └──────────────┘    └─────────┬───────────┘ │
//!                    │                                │             │
//!                    │                                ▼             │
//!                    │                      ┌──────────────────┐    │
//!                    │                      │   text service   │    │
//!                    │                      │  (validation +   │    │
//!                    │                      │   lookups)       │    │
//!                    │                      └────────┬─────────┘    │
//!                    │                               │              │
//!   Client Response  │  ┌──────────────┐    ┌────────▼─────────┐    │
//!   ◀────────────────┼──│observability │◀───│    repository    │    │
//!                    │  │count/latency/│    │   (abstract      │    │
//!                    │  │ id echo      │    │    storage)      │    │
//!                    │  └──────────────┘    └──────────────────┘    │
//!                    │                                               │
//!                    │  Cross-cutting: config, health, error model   │
//!                    └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod models;
pub mod repository;
pub mod service;

// Cross-cutting concerns
pub mod health;
pub mod observability;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::loader::{apply_env_overrides, load_config};
use crate::config::{ServiceConfig, StorageMode};
use crate::http::HttpServer;
use crate::repository::{MemoryRepository, TextRepository};

#[derive(Parser, Debug)]
#[command(version, about = "Internationalized text retrieval service")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "text_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("text-service v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let mut config = match args.config {
        Some(path) => load_config(&path)?,
        None => ServiceConfig::default(),
    };
    apply_env_overrides(&mut config);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        language_header = %config.headers.language,
        request_id_header = %config.headers.request_id,
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );

    let repository: Arc<dyn TextRepository> = match config.storage.mode {
        StorageMode::Memory => Arc::new(MemoryRepository::new()),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config, repository);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
