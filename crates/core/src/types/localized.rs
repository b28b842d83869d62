//! Localized display text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A mapping from language code to display string.
///
/// Catalog records carry their name and description in multiple languages,
/// keyed by two-letter language code (`en`, `it`, ...). English is the
/// reference language: slug derivation reads the `en` entry.
///
/// Backed by a `BTreeMap` so serialized snapshots keep a stable key order.
///
/// ## Examples
///
/// ```
/// use artiva_core::LocalizedText;
///
/// let name = LocalizedText::new().with("en", "Salad Bowl").with("it", "Insalatiera");
/// assert_eq!(name.en(), Some("Salad Bowl"));
/// assert_eq!(name.get("it"), Some("Insalatiera"));
/// assert_eq!(name.get("de"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    /// Create an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(lang.into(), text.into());
        self
    }

    /// Get the text for a language code.
    #[must_use]
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// Get the English text, if present.
    #[must_use]
    pub fn en(&self) -> Option<&str> {
        self.get("en")
    }

    /// Insert or replace the text for a language code.
    pub fn insert(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.0.insert(lang.into(), text.into());
    }

    /// Returns `true` if no language entries exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of language entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(l, t)| (l.into(), t.into()))
                .collect(),
        )
    }
}
