//! URL-safe category slugs.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A URL-safe identifier string for a category.
///
/// Slugs are unique by convention only - nothing enforces uniqueness across
/// the collection, and product category references pointing at a slug are
/// never checked against the category collection.
///
/// When no explicit slug is supplied for a category, one is derived
/// deterministically from the English name: lower-cased, with whitespace
/// runs collapsed to a single hyphen.
///
/// ## Examples
///
/// ```
/// use artiva_core::Slug;
///
/// assert_eq!(Slug::derive("Salad Bowls").as_str(), "salad-bowls");
/// assert_eq!(Slug::derive("Multi   Space").as_str(), "multi-space");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Create a slug from an explicit string value.
    ///
    /// The value is taken as-is; explicit slugs are not normalized.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Derive a slug from a display name.
    ///
    /// Lower-cases the name and replaces each whitespace run with a single
    /// hyphen.
    #[must_use]
    pub fn derive(name: &str) -> Self {
        Self(
            name.to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-"),
        )
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Slug {
    fn from(slug: String) -> Self {
        Self(slug)
    }
}

impl From<&str> for Slug {
    fn from(slug: &str) -> Self {
        Self(slug.to_owned())
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_simple() {
        assert_eq!(Slug::derive("Salad Bowls").as_str(), "salad-bowls");
    }

    #[test]
    fn test_derive_collapses_whitespace_runs() {
        assert_eq!(Slug::derive("Multi   Space").as_str(), "multi-space");
        assert_eq!(Slug::derive("a \t b").as_str(), "a-b");
    }

    #[test]
    fn test_derive_single_word() {
        assert_eq!(Slug::derive("Vases").as_str(), "vases");
    }

    #[test]
    fn test_explicit_slug_kept_as_is() {
        assert_eq!(Slug::new("My Custom Slug").as_str(), "My Custom Slug");
    }

    #[test]
    fn test_serde_transparent() {
        let slug = Slug::derive("Salad Bowls");
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"salad-bowls\"");
    }
}
