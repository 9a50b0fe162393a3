//! Internationalized text retrieval service library.

pub mod config;
pub mod health;
pub mod http;
pub mod models;
pub mod observability;
pub mod repository;
pub mod service;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use service::TextService;
