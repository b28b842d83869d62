//! Artiva Catalog Server - JSON API backend.
//!
//! Serves the product and category catalog, image uploads, and the
//! credential check consumed by the frontend.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API under `/api`
//! - In-memory collections mirrored to whole-collection JSON snapshots
//! - Uploaded images stored under a managed directory served at `/uploads`
//! - Fixed seed user list for the credential check (no session store)

#![cfg_attr(not(test), forbid(unsafe_code))]

use artiva_server::{app, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "artiva_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load snapshots (or install the seed set) and build application state
    let addr = config.socket_addr();
    let state = AppState::open(config).expect("Failed to initialize application state");
    tracing::info!(
        products = state.store().list_products().len(),
        categories = state.store().list_categories().len(),
        "catalog loaded"
    );

    let app = app(state);

    // Start server
    tracing::info!("catalog server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
