//! # Twitlink
//!
//! HTTP host adapter for the Twitter link previewer. A chat bot posts each
//! channel message to `/message` and sends the returned lines back to the
//! channel.
//!
//! ## Environment Variables
//!
//! - `twitter_consumer_key`, `twitter_consumer_secret`: Twitter API consumer credentials
//! - `PORT`: Server port (defaults to 3000)
//!
//! See the library documentation for the optional display settings.

use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use twitlink::{create_app, get_server_port, load_time_settings, TwitterConfig, TwitterPlugin};

/// Main entry point for the twitlink service.
///
/// Initializes logging, loads the configuration, and serves the HTTP host
/// adapter until Ctrl-C is received.
///
/// # Logging
///
/// The application uses the `env_logger` crate for structured logging. Log levels
/// can be controlled via the `RUST_LOG` environment variable.
///
/// # Example Usage
///
/// ```bash
/// twitter_consumer_key=... twitter_consumer_secret=... RUST_LOG=debug cargo run
/// ```
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize the logging system
    env_logger::init();

    let config = TwitterConfig::from_env()?;
    let time_settings = load_time_settings()?;
    let plugin = Arc::new(TwitterPlugin::new(config, Arc::new(time_settings)));

    // Build the HTTP application with all routes and middleware
    let app = create_app(plugin).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let port = get_server_port()?;
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    info!("Starting twitlink server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("HTTP server error: {}", e);
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}
