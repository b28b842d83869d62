//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::auth::AuthService;
use crate::services::catalog::CatalogService;
use crate::services::images::ImageStore;
use crate::store::seed;
use crate::store::snapshot::StoreError;
use crate::store::CatalogStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog store, the image manager, and the credential check.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: CatalogStore,
    images: ImageStore,
    auth: AuthService,
}

impl AppState {
    /// Open the application state from configuration.
    ///
    /// Loads the collection snapshots (seeding them on first start) and
    /// wires the image store to the managed upload directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the snapshots cannot be loaded or the seed
    /// cannot be written.
    pub fn open(config: ServerConfig) -> Result<Self, StoreError> {
        let store = CatalogStore::open(&config.data_dir)?;
        let images = ImageStore::new(&config.upload_dir);
        let auth = AuthService::new(seed::users());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                images,
                auth,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn store(&self) -> &CatalogStore {
        &self.inner.store
    }

    /// Get a reference to the image store.
    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.inner.images
    }

    /// Get a reference to the credential check.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Build a catalog service over the shared store and image manager.
    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self.store(), self.images())
    }
}
