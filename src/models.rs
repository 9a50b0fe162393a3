//! Domain types for languages, translated texts and text groups.
//!
//! Reference data only: everything here is created and maintained by an
//! external content-management process and is read-only at request time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Text output format: a map from text key to translated value.
pub type Texts = HashMap<String, String>;

/// A supported language. Existence in the repository implies support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-1 style language tag (e.g. "en", "sv").
    pub id: String,
}

impl Language {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// A localized text. The key is unique within a language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedText {
    pub key: String,
    pub language: String,
    pub value: String,
}

impl TranslatedText {
    pub fn new(
        key: impl Into<String>,
        language: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            language: language.into(),
            value: value.into(),
        }
    }
}

/// A named group of text keys resolved together in one request.
///
/// A group does not own its texts; it references keys by name. A member key
/// may have no translation in a given language, which is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextGroup {
    pub id: String,
    /// Member text keys, in insertion order.
    pub keys: Vec<String>,
}

impl TextGroup {
    pub fn new(id: impl Into<String>, keys: Vec<String>) -> Self {
        Self {
            id: id.into(),
            keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texts_serializes_as_flat_map() {
        let mut texts = Texts::new();
        texts.insert("greeting".to_string(), "Hello".to_string());

        let json = serde_json::to_value(&texts).unwrap();
        assert_eq!(json, serde_json::json!({"greeting": "Hello"}));
    }

    #[test]
    fn test_group_keeps_key_order() {
        let group = TextGroup::new(
            "onboarding",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        assert_eq!(group.keys, vec!["a", "b", "c"]);
    }
}
