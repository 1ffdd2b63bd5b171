/// Server setup and initialization
///
/// Wires together the canvas store, request handler, and HTTP routes.
/// Provides the main application factory function for creating the Axum app.

use crate::{
    api::{canvas::dispatch_canvas, create_canvas_routes, AppState},
    canvas::CanvasStorage,
    config::Config,
    trigger::CanvasHandler,
};
use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Create the main Axum application with all routes
///
/// Connects to the canvas store, ensures the schema exists, and binds the
/// request handler into the router.
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("🗄️ Connecting to canvas store: {}", config.database.url);
    let storage = CanvasStorage::connect(&config.database.url).await?;

    tracing::info!("📋 Ensuring canvas schema exists");
    storage.init_schema().await?;

    let state = AppState {
        handler: Arc::new(CanvasHandler::new(storage)),
    };

    tracing::info!("📡 Creating HTTP router");
    let app = Router::new()
        // Health check endpoint; other methods on this path still belong
        // to the canvas contract and its 405 body
        .route("/healthz", get(health_check).fallback(dispatch_canvas))
        // Canvas API (method-dispatched on any path)
        .merge(create_canvas_routes())
        .with_state(state);

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given configuration
///
/// Creates the application and starts the Axum server on the configured address and port.
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting canvas API server...");

    // Create the application
    let app = create_app(config.clone()).await?;

    // Bind to the configured address
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    // Start the server
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
