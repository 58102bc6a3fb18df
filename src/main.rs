//! Sass Server
//!
//! Serves compiled stylesheets straight from `.sass`/`.scss` sources.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ sass::request (descriptor)
//!                                          │
//!                          config::store ──┤ (effective options per scope)
//!                                          ▼
//!                                    sass::classifier ── declined ──▶ static files
//!                                          │ accepted
//!                                          ▼
//!                                    sass::invoker ──▶ grass
//!                                          │
//!                                          ▼
//!     Client Response              sass::dispatcher ──▶ optional .css/.map writes
//!     ◀────────────────────────────────────┘
//! ```
//!
//! Usage: `sass-server [CONFIG]` (or set `SASS_SERVER_CONFIG`).

use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use sass_server::config::load_config;
use sass_server::config::watcher::ConfigWatcher;
use sass_server::observability::{logging, metrics};
use sass_server::{lifecycle, HttpServer, ServerConfig, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path: Option<PathBuf> = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("SASS_SERVER_CONFIG").map(PathBuf::from));

    let config = match &config_path {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init_tracing(&config.observability.log_level);

    tracing::info!("sass-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        document_root = %config.server.document_root,
        scopes = config.scopes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Keep the watcher alive for the lifetime of the server
    let (_watcher, config_updates) = match &config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            match watcher.run() {
                Ok(w) => (Some(w), updates),
                Err(e) => {
                    tracing::warn!(error = %e, "Config hot reload disabled");
                    (None, updates)
                }
            }
        }
        None => (None, mpsc::unbounded_channel().1),
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        lifecycle::signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
