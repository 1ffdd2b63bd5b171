/// Canvas API server
///
/// Main entry point. Initializes configuration and starts the HTTP server.

use canvas_api::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - Canvas API at / (GET/POST/OPTIONS, method-dispatched)
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults to 0.0.0.0:8080 and a local SQLite store)
    let config = Config::default();

    // Start the server
    start_server(config).await?;

    Ok(())
}
