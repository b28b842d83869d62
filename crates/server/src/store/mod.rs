//! Catalog record storage.
//!
//! The [`CatalogStore`] owns the in-memory product and category collections
//! and mirrors every mutation to the snapshot files before the operation is
//! considered complete. Collections are populated once at process start:
//! loaded from existing snapshots if present, else initialized from the seed
//! set and persisted immediately.
//!
//! # Consistency
//!
//! Each mutation runs mutate-then-save under the collection's lock, so
//! concurrent requests see serialized mutations rather than the lost-update
//! race the single-threaded original accepted. There is still no rollback:
//! if the save fails after the in-memory mutation applied, the error
//! surfaces to the caller and memory and disk may diverge until the next
//! successful save.

pub mod records;
pub mod seed;
pub mod snapshot;

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use artiva_core::{Category, CategoryPatch, Product, ProductPatch};

use self::records::RecordSet;
use self::snapshot::{SnapshotStore, StoreError};

const PRODUCTS: &str = "products";
const CATEGORIES: &str = "categories";

/// In-memory catalog collections backed by whole-collection snapshots.
#[derive(Debug)]
pub struct CatalogStore {
    snapshots: SnapshotStore,
    products: Mutex<RecordSet<Product>>,
    categories: Mutex<RecordSet<Category>>,
}

impl CatalogStore {
    /// Open the store, loading snapshots or installing the seed set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a snapshot exists but cannot be read, or if
    /// writing the initial seed snapshot fails.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let snapshots = SnapshotStore::new(data_dir.as_ref());

        let products = match snapshots.load::<Product>(PRODUCTS)? {
            Some(products) => products,
            None => {
                let products = seed::products();
                snapshots.save(PRODUCTS, &products)?;
                tracing::info!(count = products.len(), "seeded product snapshot");
                products
            }
        };

        let categories = match snapshots.load::<Category>(CATEGORIES)? {
            Some(categories) => categories,
            None => {
                let categories = seed::categories();
                snapshots.save(CATEGORIES, &categories)?;
                tracing::info!(count = categories.len(), "seeded category snapshot");
                categories
            }
        };

        Ok(Self {
            snapshots,
            products: Mutex::new(RecordSet::new(products)),
            categories: Mutex::new(RecordSet::new(categories)),
        })
    }

    fn lock<T>(collection: &Mutex<RecordSet<T>>) -> MutexGuard<'_, RecordSet<T>> {
        collection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// The current product collection in insertion order.
    #[must_use]
    pub fn list_products(&self) -> Vec<Product> {
        Self::lock(&self.products).list()
    }

    /// Look up a product by identifier.
    #[must_use]
    pub fn get_product(&self, id: &str) -> Option<Product> {
        Self::lock(&self.products).get(id).cloned()
    }

    /// Append a product and persist the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot write fails.
    pub fn insert_product(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = Self::lock(&self.products);
        products.push(product.clone());
        self.snapshots.save(PRODUCTS, products.as_slice())?;
        tracing::info!(id = %product.id, "product created");
        Ok(product)
    }

    /// Overlay a patch onto the product with `id` and persist.
    ///
    /// Returns `Ok(None)` when no product with that identifier exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot write fails.
    pub fn update_product(
        &self,
        id: &str,
        patch: ProductPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = Self::lock(&self.products);
        let Some(product) = products.get_mut(id) else {
            return Ok(None);
        };

        product.apply(patch, now);
        let updated = product.clone();
        self.snapshots.save(PRODUCTS, products.as_slice())?;
        tracing::info!(id = %updated.id, "product updated");
        Ok(Some(updated))
    }

    /// Remove the product with `id` and persist.
    ///
    /// Returns the removed record so the caller can release its image file,
    /// or `Ok(None)` when no product with that identifier exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot write fails.
    pub fn remove_product(&self, id: &str) -> Result<Option<Product>, StoreError> {
        let mut products = Self::lock(&self.products);
        let Some(product) = products.remove(id) else {
            return Ok(None);
        };

        self.snapshots.save(PRODUCTS, products.as_slice())?;
        tracing::info!(id = %product.id, "product deleted");
        Ok(Some(product))
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// The current category collection in insertion order.
    #[must_use]
    pub fn list_categories(&self) -> Vec<Category> {
        Self::lock(&self.categories).list()
    }

    /// Look up a category by identifier.
    #[must_use]
    pub fn get_category(&self, id: &str) -> Option<Category> {
        Self::lock(&self.categories).get(id).cloned()
    }

    /// Append a category and persist the collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot write fails.
    pub fn insert_category(&self, category: Category) -> Result<Category, StoreError> {
        let mut categories = Self::lock(&self.categories);
        categories.push(category.clone());
        self.snapshots.save(CATEGORIES, categories.as_slice())?;
        tracing::info!(id = %category.id, slug = %category.slug, "category created");
        Ok(category)
    }

    /// Overlay a resolved patch onto the category with `id` and persist.
    ///
    /// Callers resolve slug derivation via `CategoryPatch::resolve` first.
    /// Returns `Ok(None)` when no category with that identifier exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot write fails.
    pub fn update_category(
        &self,
        id: &str,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, StoreError> {
        let mut categories = Self::lock(&self.categories);
        let Some(category) = categories.get_mut(id) else {
            return Ok(None);
        };

        category.apply(patch);
        let updated = category.clone();
        self.snapshots.save(CATEGORIES, categories.as_slice())?;
        tracing::info!(id = %updated.id, "category updated");
        Ok(Some(updated))
    }

    /// Remove the category with `id` and persist.
    ///
    /// No cascade: products referencing the slug keep their dangling
    /// reference.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshot write fails.
    pub fn remove_category(&self, id: &str) -> Result<Option<Category>, StoreError> {
        let mut categories = Self::lock(&self.categories);
        let Some(category) = categories.remove(id) else {
            return Ok(None);
        };

        self.snapshots.save(CATEGORIES, categories.as_slice())?;
        tracing::info!(id = %category.id, "category deleted");
        Ok(Some(category))
    }
}
