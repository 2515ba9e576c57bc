//! HTTP server for pin-drop
//!
//! Hosts the `address` resource and geocoding helper endpoints.

pub mod routes;
pub mod state;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::AddressStore;
use routes::create_router;
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Open the address store named by config, or the default one
pub fn open_store(config: &Config) -> Result<AddressStore> {
    if config.server.data_file.is_empty() {
        AddressStore::load()
    } else {
        AddressStore::load_from(PathBuf::from(&config.server.data_file))
    }
}

/// Start the HTTP server
///
/// # Arguments
/// * `config` - Server configuration
///
/// # Returns
/// Never returns unless the server shuts down
pub async fn run(config: Config) -> Result<()> {
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| Error::Server(format!("Invalid server address: {}", e)))?;

    let store = open_store(&config)?;
    info!(
        "Loaded {} addresses from {}",
        store.len(),
        store.path().display()
    );

    let state = Arc::new(AppState::new(config, store));
    let app = create_router(state);

    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("Server error: {}", e)))?;

    Ok(())
}
