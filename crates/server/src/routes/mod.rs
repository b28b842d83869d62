//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET    /api/products         - Full product list
//! GET    /api/products/{id}    - Product by id
//! POST   /api/products         - Create (multipart: `product` JSON + optional `image` file)
//! PUT    /api/products/{id}    - Update (same shape)
//! DELETE /api/products/{id}    - Delete + best-effort image removal
//!
//! # Categories
//! GET    /api/categories       - Full category list
//! POST   /api/categories       - Create (JSON body)
//! PUT    /api/categories/{id}  - Update
//! DELETE /api/categories/{id}  - Delete
//!
//! # Auth
//! POST /api/auth/login         - Credential check, returns {id, username, role, token}
//!
//! # Static
//! /uploads/*                   - Uploaded images (managed storage directory)
//! ```

pub mod auth;
pub mod categories;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// JSON `{"message"}` body for delete confirmations and error responses.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::remove),
        )
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route(
            "/{id}",
            get(categories::show)
                .put(categories::update)
                .delete(categories::remove),
        )
}

/// Create all `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .route("/auth/login", post(auth::login))
}
