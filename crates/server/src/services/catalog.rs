//! Catalog service.
//!
//! Orchestrates the record store and the image lifecycle to implement the
//! product and category CRUD semantics: merge rules, slug derivation,
//! timestamps, and image-file ownership.

use chrono::Utc;

use artiva_core::{
    Category, CategoryDraft, CategoryPatch, Product, ProductDraft, ProductPatch,
};

use crate::error::{AppError, Result};
use crate::services::images::ImageStore;
use crate::store::CatalogStore;

/// Borrowing facade over the store and image manager.
pub struct CatalogService<'a> {
    store: &'a CatalogStore,
    images: &'a ImageStore,
}

impl<'a> CatalogService<'a> {
    /// Create a catalog service over the shared store and image manager.
    #[must_use]
    pub const fn new(store: &'a CatalogStore, images: &'a ImageStore) -> Self {
        Self { store, images }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// All products in insertion order.
    #[must_use]
    pub fn list_products(&self) -> Vec<Product> {
        self.store.list_products()
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has the identifier.
    pub fn product(&self, id: &str) -> Result<Product> {
        self.store
            .get_product(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    /// Create a product.
    ///
    /// When an upload accompanied the request, its stored path wins over any
    /// image the payload carried; otherwise the payload's image (or nothing)
    /// is used.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if persistence fails.
    pub fn create_product(
        &self,
        mut draft: ProductDraft,
        uploaded: Option<String>,
    ) -> Result<Product> {
        if uploaded.is_some() {
            draft.image = uploaded;
        }
        let product = Product::create(draft, Utc::now());
        Ok(self.store.insert_product(product)?)
    }

    /// Update a product.
    ///
    /// A new upload replaces the image; a patch without one falls back to
    /// the payload's explicit image field, else the stored path is
    /// preserved unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has the identifier, or
    /// `AppError::Store` if persistence fails.
    pub fn update_product(
        &self,
        id: &str,
        mut patch: ProductPatch,
        uploaded: Option<String>,
    ) -> Result<Product> {
        if let Some(path) = uploaded {
            patch.image = Some(Some(path));
        }
        self.store
            .update_product(id, patch, Utc::now())?
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    /// Delete a product and release its image file.
    ///
    /// The release is best-effort: only managed paths are touched, a
    /// missing file is a no-op, and an I/O failure is logged without
    /// failing the already-committed delete.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has the identifier, or
    /// `AppError::Store` if persistence fails.
    pub fn delete_product(&self, id: &str) -> Result<Product> {
        let product = self
            .store
            .remove_product(id)?
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

        if let Some(image) = &product.image
            && let Err(err) = self.images.remove(image)
        {
            tracing::warn!(image = %image, error = %err, "failed to release product image");
        }

        Ok(product)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// All categories in insertion order.
    #[must_use]
    pub fn list_categories(&self) -> Vec<Category> {
        self.store.list_categories()
    }

    /// Look up a category.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no category has the identifier.
    pub fn category(&self, id: &str) -> Result<Category> {
        self.store
            .get_category(id)
            .ok_or_else(|| AppError::NotFound(format!("category {id}")))
    }

    /// Create a category, deriving the slug when none is supplied.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if slug derivation needs an English
    /// name that the draft lacks, or `AppError::Store` if persistence fails.
    pub fn create_category(&self, draft: CategoryDraft) -> Result<Category> {
        let category = Category::create(draft)?;
        Ok(self.store.insert_category(category)?)
    }

    /// Update a category, re-deriving the slug on rename when needed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if derivation needs an English name
    /// the patch lacks, `AppError::NotFound` if no category has the
    /// identifier, or `AppError::Store` if persistence fails.
    pub fn update_category(&self, id: &str, patch: CategoryPatch) -> Result<Category> {
        let patch = patch.resolve()?;
        self.store
            .update_category(id, patch)?
            .ok_or_else(|| AppError::NotFound(format!("category {id}")))
    }

    /// Delete a category.
    ///
    /// No cascade: products referencing the slug are unaffected.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no category has the identifier, or
    /// `AppError::Store` if persistence fails.
    pub fn delete_category(&self, id: &str) -> Result<Category> {
        self.store
            .remove_category(id)?
            .ok_or_else(|| AppError::NotFound(format!("category {id}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artiva_core::LocalizedText;

    use super::*;

    struct Fixture {
        _data: tempfile::TempDir,
        _uploads: tempfile::TempDir,
        store: CatalogStore,
        images: ImageStore,
    }

    impl Fixture {
        fn new() -> Self {
            let data = tempfile::tempdir().unwrap();
            let uploads = tempfile::tempdir().unwrap();
            let store = CatalogStore::open(data.path()).unwrap();
            let images = ImageStore::new(uploads.path());
            Self {
                _data: data,
                _uploads: uploads,
                store,
                images,
            }
        }

        fn catalog(&self) -> CatalogService<'_> {
            CatalogService::new(&self.store, &self.images)
        }
    }

    #[test]
    fn test_create_product_upload_wins_over_payload_image() {
        let fixture = Fixture::new();
        let draft = ProductDraft {
            image: Some("/assets/ignored.jpg".to_owned()),
            ..ProductDraft::default()
        };

        let product = fixture
            .catalog()
            .create_product(draft, Some("/uploads/fresh.jpg".to_owned()))
            .unwrap();
        assert_eq!(product.image.as_deref(), Some("/uploads/fresh.jpg"));
    }

    #[test]
    fn test_create_product_without_upload_uses_payload_image() {
        let fixture = Fixture::new();
        let draft = ProductDraft {
            image: Some("/assets/explicit.jpg".to_owned()),
            ..ProductDraft::default()
        };

        let product = fixture.catalog().create_product(draft, None).unwrap();
        assert_eq!(product.image.as_deref(), Some("/assets/explicit.jpg"));
    }

    #[test]
    fn test_update_product_without_upload_preserves_image() {
        let fixture = Fixture::new();
        let updated = fixture
            .catalog()
            .update_product("1", ProductPatch::default(), None)
            .unwrap();
        assert_eq!(
            updated.image.as_deref(),
            Some("/assets/products/salad-bowl.jpg")
        );
    }

    #[test]
    fn test_delete_product_releases_managed_image() {
        let fixture = Fixture::new();
        let uploaded = fixture
            .images
            .store("cup.png", "image/png", b"fake")
            .unwrap();
        let product = fixture
            .catalog()
            .create_product(ProductDraft::default(), Some(uploaded.clone()))
            .unwrap();

        fixture.catalog().delete_product(product.id.as_str()).unwrap();

        let file_name = uploaded.rsplit('/').next().unwrap();
        assert!(!fixture.images.root().join(file_name).exists());
    }

    #[test]
    fn test_delete_seed_product_leaves_bundled_asset_alone() {
        let fixture = Fixture::new();
        // Seed product 1 references /assets/..., which is not managed.
        let product = fixture.catalog().delete_product("1").unwrap();
        assert!(product.image.unwrap().starts_with("/assets/"));
    }

    #[test]
    fn test_missing_ids_surface_not_found() {
        let fixture = Fixture::new();
        let catalog = fixture.catalog();

        assert!(matches!(catalog.product("nope"), Err(AppError::NotFound(_))));
        assert!(matches!(
            catalog.update_product("nope", ProductPatch::default(), None),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            catalog.delete_product("nope"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            catalog.category("nope"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_create_category_without_english_name_is_validation_error() {
        let fixture = Fixture::new();
        let draft = CategoryDraft {
            name: LocalizedText::new().with("it", "Piatti"),
            slug: None,
        };

        let result = fixture.catalog().create_category(draft);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_category_crud_roundtrip() {
        let fixture = Fixture::new();
        let catalog = fixture.catalog();

        let created = catalog
            .create_category(CategoryDraft {
                name: LocalizedText::new().with("en", "Dinner Plates"),
                slug: None,
            })
            .unwrap();
        assert_eq!(created.slug.as_str(), "dinner-plates");

        let updated = catalog
            .update_category(
                created.id.as_str(),
                CategoryPatch {
                    name: Some(LocalizedText::new().with("en", "Side Plates")),
                    slug: None,
                },
            )
            .unwrap();
        assert_eq!(updated.slug.as_str(), "side-plates");

        catalog.delete_category(created.id.as_str()).unwrap();
        assert!(matches!(
            catalog.category(created.id.as_str()),
            Err(AppError::NotFound(_))
        ));
    }
}
