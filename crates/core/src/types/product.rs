//! Product record type with its create and update payload shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;
use super::localized::LocalizedText;
use super::slug::Slug;

/// A catalog product.
///
/// The identifier is immutable and unique across the collection, and
/// `created_at` never changes after creation. `updated_at` is absent until
/// the first update and restamped on every subsequent one.
///
/// `category` is a soft reference to a category slug - deleting a category
/// does not affect products referencing it, and the reference is never
/// validated against the category collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, immutable record identifier.
    pub id: ProductId,
    /// Localized display name, keyed by language code.
    #[serde(default)]
    pub name: LocalizedText,
    /// Localized description, same shape as `name`.
    #[serde(default)]
    pub description: LocalizedText,
    /// Slug of the category this product belongs to (unchecked).
    #[serde(default)]
    pub category: Slug,
    /// Public path of the product image, if any.
    #[serde(default)]
    pub image: Option<String>,
    /// Free-text dimensions, e.g. `"⌀ 24 cm, h 9 cm"`.
    #[serde(default)]
    pub dimensions: String,
    /// Free-text material, e.g. `"glazed stoneware"`.
    #[serde(default)]
    pub material: String,
    /// Stamped once at creation.
    pub created_at: DateTime<Utc>,
    /// Stamped on every update; absent until the first one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create payload for a product.
///
/// Every field is optional in the request body; absent fields fall back to
/// their defaults (empty text, no image).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductDraft {
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub category: Slug,
    pub image: Option<String>,
    pub dimensions: String,
    pub material: String,
}

/// Update payload for a product.
///
/// Fields absent from the patch preserve the stored value. The `image` field
/// distinguishes three states: absent (preserve), explicit `null` (clear),
/// and a string (replace).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub category: Option<Slug>,
    #[serde(deserialize_with = "double_option")]
    pub image: Option<Option<String>>,
    pub dimensions: Option<String>,
    pub material: Option<String>,
}

impl Product {
    /// Build a new product from a create payload.
    ///
    /// Assigns a fresh unique identifier and stamps the creation time;
    /// `updated_at` starts absent.
    #[must_use]
    pub fn create(draft: ProductDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::generate(),
            name: draft.name,
            description: draft.description,
            category: draft.category,
            image: draft.image,
            dimensions: draft.dimensions,
            material: draft.material,
            created_at: now,
            updated_at: None,
        }
    }

    /// Overlay a patch onto this product, field by field.
    ///
    /// Shallow top-level merge: a patch field that is present replaces the
    /// stored field entirely (a partial localized mapping replaces the whole
    /// mapping, dropping other languages); absent fields are preserved.
    /// Stamps `updated_at`; `id` and `created_at` are untouchable.
    pub fn apply(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(dimensions) = patch.dimensions {
            self.dimensions = dimensions;
        }
        if let Some(material) = patch.material {
            self.material = material;
        }
        self.updated_at = Some(now);
    }
}

impl ProductPatch {
    /// Returns `true` if the patch carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.image.is_none()
            && self.dimensions.is_none()
            && self.material.is_none()
    }
}

/// Deserialize an `Option<Option<T>>` distinguishing absent from `null`.
///
/// Plain serde collapses `null` into the outer `None`; combined with
/// `#[serde(default)]` this helper maps absent → `None`, `null` →
/// `Some(None)`, and a value → `Some(Some(value))`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
