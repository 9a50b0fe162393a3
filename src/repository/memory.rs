//! In-memory repository implementation.
//!
//! Backs the `memory` storage mode: local runs and tests where no external
//! database is wired up. Seed data is inserted through the `add_*` methods.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::models::{Language, TextGroup, TranslatedText};
use crate::repository::{RepositoryError, TextRepository};

#[derive(Default)]
struct Store {
    languages: HashMap<String, Language>,
    /// Keyed by (language, key); a text key is unique within a language.
    texts: HashMap<(String, String), TranslatedText>,
    groups: HashMap<String, TextGroup>,
}

/// Thread-safe in-memory text store.
#[derive(Default)]
pub struct MemoryRepository {
    store: RwLock<Store>,
    healthy: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store::default()),
            healthy: AtomicBool::new(true),
        }
    }

    pub fn add_language(&self, id: &str) {
        if let Ok(mut store) = self.store.write() {
            store.languages.insert(id.to_string(), Language::new(id));
        }
    }

    pub fn add_text(&self, key: &str, language: &str, value: &str) {
        if let Ok(mut store) = self.store.write() {
            store.texts.insert(
                (language.to_string(), key.to_string()),
                TranslatedText::new(key, language, value),
            );
        }
    }

    pub fn add_group(&self, id: &str, keys: &[&str]) {
        if let Ok(mut store) = self.store.write() {
            let keys = keys.iter().map(|k| k.to_string()).collect();
            store.groups.insert(id.to_string(), TextGroup::new(id, keys));
        }
    }

    /// Toggles the connectivity probe, simulating a dependency outage.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Relaxed);
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Store>, RepositoryError> {
        self.store
            .read()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl TextRepository for MemoryRepository {
    async fn find_language(&self, id: &str) -> Result<Option<Language>, RepositoryError> {
        Ok(self.read()?.languages.get(id).cloned())
    }

    async fn find_text_by_key(
        &self,
        key: &str,
        language: &str,
    ) -> Result<Option<TranslatedText>, RepositoryError> {
        let store = self.read()?;
        Ok(store
            .texts
            .get(&(language.to_string(), key.to_string()))
            .cloned())
    }

    async fn find_texts_by_keys(
        &self,
        keys: &[String],
        language: &str,
    ) -> Result<Vec<TranslatedText>, RepositoryError> {
        let store = self.read()?;
        let texts = keys
            .iter()
            .filter_map(|key| store.texts.get(&(language.to_string(), key.clone())))
            .cloned()
            .collect();
        Ok(texts)
    }

    async fn find_group(&self, group_id: &str) -> Result<Option<TextGroup>, RepositoryError> {
        Ok(self.read()?.groups.get(group_id).cloned())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        if self.healthy.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(RepositoryError::Unavailable(
                "connectivity probe failed".to_string(),
            ))
        }
    }
}
