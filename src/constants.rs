//! Centralized constants for the pin-drop crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Meters per degree of latitude (approximate, varies slightly with latitude)
    pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;
}

/// External API endpoints
pub mod api {
    /// Google Geocoding API (JSON output)
    pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";

    /// Environment variable that overrides the configured Google API key
    pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

    /// Name of the backend resource that stores addresses
    pub const ADDRESS_RESOURCE: &str = "address";
}

/// Map defaults
pub mod map {
    /// Initial map center latitude (Colombo)
    pub const CENTER_LAT: f64 = 6.927079;

    /// Initial map center longitude (Colombo)
    pub const CENTER_LNG: f64 = 79.861244;

    /// Initial map zoom level
    pub const ZOOM: u8 = 8;

    /// Zoom level after panning to a search result
    pub const SEARCH_ZOOM: u8 = 14;

    /// Radius around the center that search results are biased to, in meters
    pub const SEARCH_RADIUS_METERS: f64 = 200_000.0;
}

/// Shown in place of an address when reverse geocoding finds nothing
pub const ADDRESS_NOT_FOUND: &str = "address not found";
