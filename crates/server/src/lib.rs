//! Artiva catalog server library.
//!
//! This crate provides the catalog backend as a library, allowing it to be
//! tested and reused. [`app`] builds the full router over an [`AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use state::AppState;

/// Request body ceiling: the image limit plus headroom for the multipart
/// framing and JSON payload.
const MAX_REQUEST_BYTES: usize = services::images::MAX_IMAGE_BYTES + 1024 * 1024;

/// Build the application router.
///
/// Serves the JSON API under `/api`, the managed upload directory under
/// `/uploads`, and a liveness check at `/health`.
#[must_use]
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.images().root());

    Router::new()
        .route("/health", get(health))
        .nest("/api", routes::api_routes())
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
