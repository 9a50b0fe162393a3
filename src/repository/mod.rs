//! Storage abstraction for languages, texts and text groups.
//!
//! # Design Decisions
//! - Absence is a valid return value (`Ok(None)` / omitted entries), never
//!   an error. `Err` means the dependency itself failed.
//! - All lookups are read-only and side-effect free.
//! - The trait is object-safe so the service can hold `Arc<dyn TextRepository>`
//!   and tests can swap in doubles.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Language, TextGroup, TranslatedText};

pub use memory::MemoryRepository;

/// Error type for repository failures.
///
/// "Not found" is not a failure and never maps here.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The underlying storage could not be reached or answered abnormally.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Storage interface for resolving languages, texts and groups.
#[async_trait]
pub trait TextRepository: Send + Sync {
    /// Looks up a language by its tag. `None` means unsupported.
    async fn find_language(&self, id: &str) -> Result<Option<Language>, RepositoryError>;

    /// Looks up a single text by key and language.
    async fn find_text_by_key(
        &self,
        key: &str,
        language: &str,
    ) -> Result<Option<TranslatedText>, RepositoryError>;

    /// Looks up a batch of texts by key. Keys with no translation in the
    /// given language are silently omitted; order is irrelevant.
    async fn find_texts_by_keys(
        &self,
        keys: &[String],
        language: &str,
    ) -> Result<Vec<TranslatedText>, RepositoryError>;

    /// Looks up a text group by id.
    async fn find_group(&self, group_id: &str) -> Result<Option<TextGroup>, RepositoryError>;

    /// Connectivity probe used by the health check.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
