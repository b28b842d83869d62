//! Category record type with its create and update payload shapes.

use serde::{Deserialize, Serialize};

use super::id::CategoryId;
use super::localized::LocalizedText;
use super::slug::Slug;

/// Errors raised by category validation.
#[derive(thiserror::Error, Debug, Clone)]
pub enum CategoryError {
    /// Slug derivation needs the English name and none was supplied.
    #[error("category name must include an English (`en`) entry when no slug is given")]
    MissingEnglishName,
}

/// A catalog category.
///
/// Carries no image and no timestamps. The slug is unique by convention
/// only; see [`Slug`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique, immutable record identifier.
    pub id: CategoryId,
    /// Localized display name, keyed by language code.
    #[serde(default)]
    pub name: LocalizedText,
    /// URL-safe identifier, derived from the English name when not explicit.
    #[serde(default)]
    pub slug: Slug,
}

/// Create payload for a category.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryDraft {
    pub name: LocalizedText,
    pub slug: Option<Slug>,
}

/// Update payload for a category.
///
/// Fields absent from the patch preserve the stored value. Callers run
/// [`CategoryPatch::resolve`] before [`Category::apply`] so that renames
/// without an explicit slug re-derive one from the new English name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryPatch {
    pub name: Option<LocalizedText>,
    pub slug: Option<Slug>,
}

impl Category {
    /// Build a new category from a create payload.
    ///
    /// Assigns a fresh unique identifier. When the draft carries no explicit
    /// slug, one is derived from the English name.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError::MissingEnglishName`] if derivation is
    /// required but the name has no `en` entry.
    pub fn create(draft: CategoryDraft) -> Result<Self, CategoryError> {
        let slug = match draft.slug {
            Some(slug) => slug,
            None => Slug::derive(draft.name.en().ok_or(CategoryError::MissingEnglishName)?),
        };

        Ok(Self {
            id: CategoryId::generate(),
            name: draft.name,
            slug,
        })
    }

    /// Overlay a resolved patch onto this category, field by field.
    ///
    /// Shallow top-level merge, same policy as products: present fields
    /// replace the stored value entirely, absent fields are preserved.
    /// `id` is untouchable.
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
    }
}

impl CategoryPatch {
    /// Fill in the slug when the patch renames without supplying one.
    ///
    /// A rename with an explicit slug keeps it; a rename alone derives the
    /// slug from the new English name; a patch touching neither field leaves
    /// the stored slug alone.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError::MissingEnglishName`] if derivation is
    /// required but the new name has no `en` entry.
    pub fn resolve(mut self) -> Result<Self, CategoryError> {
        if self.slug.is_none()
            && let Some(name) = &self.name
        {
            self.slug = Some(Slug::derive(
                name.en().ok_or(CategoryError::MissingEnglishName)?,
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bowls() -> Category {
        Category::create(CategoryDraft {
            name: LocalizedText::new().with("en", "Bowls").with("it", "Ciotole"),
            slug: None,
        })
        .unwrap()
    }

    #[test]
    fn test_create_derives_slug_from_english_name() {
        let category = Category::create(CategoryDraft {
            name: LocalizedText::new()
                .with("en", "Salad Bowls")
                .with("it", "Insalatiere"),
            slug: None,
        })
        .unwrap();

        assert_eq!(category.slug.as_str(), "salad-bowls");
    }

    #[test]
    fn test_create_collapses_whitespace_runs() {
        let category = Category::create(CategoryDraft {
            name: LocalizedText::new().with("en", "Multi   Space"),
            slug: None,
        })
        .unwrap();

        assert_eq!(category.slug.as_str(), "multi-space");
    }

    #[test]
    fn test_create_keeps_explicit_slug() {
        let category = Category::create(CategoryDraft {
            name: LocalizedText::new().with("en", "Salad Bowls"),
            slug: Some(Slug::new("bowls")),
        })
        .unwrap();

        assert_eq!(category.slug.as_str(), "bowls");
    }

    #[test]
    fn test_create_without_english_name_fails() {
        let result = Category::create(CategoryDraft {
            name: LocalizedText::new().with("it", "Insalatiere"),
            slug: None,
        });

        assert!(matches!(result, Err(CategoryError::MissingEnglishName)));
    }

    #[test]
    fn test_resolve_rename_derives_slug() {
        let patch = CategoryPatch {
            name: Some(LocalizedText::new().with("en", "Serving Bowls")),
            slug: None,
        }
        .resolve()
        .unwrap();

        assert_eq!(patch.slug.as_ref().map(Slug::as_str), Some("serving-bowls"));
    }

    #[test]
    fn test_resolve_explicit_slug_wins() {
        let patch = CategoryPatch {
            name: Some(LocalizedText::new().with("en", "Serving Bowls")),
            slug: Some(Slug::new("bowls")),
        }
        .resolve()
        .unwrap();

        assert_eq!(patch.slug.as_ref().map(Slug::as_str), Some("bowls"));
    }

    #[test]
    fn test_resolve_empty_patch_is_noop() {
        let patch = CategoryPatch::default().resolve().unwrap();
        assert!(patch.name.is_none());
        assert!(patch.slug.is_none());
    }

    #[test]
    fn test_resolve_rename_without_english_fails() {
        let result = CategoryPatch {
            name: Some(LocalizedText::new().with("it", "Ciotole")),
            slug: None,
        }
        .resolve();

        assert!(matches!(result, Err(CategoryError::MissingEnglishName)));
    }

    #[test]
    fn test_apply_overlays_present_fields() {
        let mut category = bowls();
        let id = category.id.clone();

        let patch = CategoryPatch {
            name: Some(LocalizedText::new().with("en", "Serving Bowls")),
            slug: None,
        }
        .resolve()
        .unwrap();
        category.apply(patch);

        assert_eq!(category.id, id);
        assert_eq!(category.name.en(), Some("Serving Bowls"));
        // Shallow merge: the new mapping replaced the old one, `it` is gone.
        assert_eq!(category.name.get("it"), None);
        assert_eq!(category.slug.as_str(), "serving-bowls");
    }

    #[test]
    fn test_apply_empty_patch_preserves_everything() {
        let mut category = bowls();
        let before = category.clone();

        category.apply(CategoryPatch::default());
        assert_eq!(category, before);
    }
}
