//! Server shared state
//!
//! Holds configuration, the address store and the geocoder.

use crate::config::Config;
use crate::geo::google::GoogleGeocoder;
use crate::store::AddressStore;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::warn;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Saved addresses; writers hold the lock across mutate and save
    pub store: RwLock<AddressStore>,

    /// Reverse/forward geocoder, absent when no API key is configured
    geocoder: Option<GoogleGeocoder>,

    started: Instant,
}

impl AppState {
    /// Create new application state, building the geocoder from config
    pub fn new(config: Config, store: AddressStore) -> Self {
        let geocoder = match GoogleGeocoder::from_config(&config) {
            Ok(geocoder) => Some(geocoder),
            Err(e) => {
                warn!("Geocoding endpoints disabled: {}", e);
                None
            }
        };
        Self::with_geocoder(config, store, geocoder)
    }

    /// Create new application state with an explicit geocoder
    pub fn with_geocoder(
        config: Config,
        store: AddressStore,
        geocoder: Option<GoogleGeocoder>,
    ) -> Self {
        Self {
            config,
            store: RwLock::new(store),
            geocoder,
            started: Instant::now(),
        }
    }

    /// Get the geocoder, if one is configured
    pub fn geocoder(&self) -> Option<&GoogleGeocoder> {
        self.geocoder.as_ref()
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
