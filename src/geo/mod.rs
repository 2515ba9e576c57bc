//! Geocoding module
//!
//! Provides reverse geocoding (coordinates to address) and forward
//! geocoding (address to coordinates) against a mapping provider.

pub mod google;
pub mod lookup;

use crate::address::AddressComponent;
use crate::constants::geo::METERS_PER_DEGREE_LAT;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// South-west and north-east corners of a box extending `radius`
    /// meters from this point, clamped to valid ranges
    pub fn bounds(&self, radius: f64) -> (Coordinates, Coordinates) {
        let dlat = radius / METERS_PER_DEGREE_LAT;
        let cos_lat = self.lat.to_radians().cos().max(1e-6);
        let dlng = radius / (METERS_PER_DEGREE_LAT * cos_lat);

        let south_west = Coordinates::new(
            (self.lat - dlat).max(-90.0),
            (self.lng - dlng).max(-180.0),
        );
        let north_east = Coordinates::new(
            (self.lat + dlat).min(90.0),
            (self.lng + dlng).min(180.0),
        );
        (south_west, north_east)
    }
}

/// A geocoded location result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

/// Raw geocoding response, shaped like the Google Geocoding API's
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResponse {
    /// Provider status code ("OK", "ZERO_RESULTS", ...)
    pub status: String,

    /// Matches, best first
    #[serde(default)]
    pub results: Vec<GeocodeResult>,

    /// Provider-supplied detail for failed requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GeocodeResponse {
    /// The best match, if the provider returned any
    pub fn first(&self) -> Option<&GeocodeResult> {
        self.results.first()
    }
}

/// A single geocoding match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub formatted_address: String,

    #[serde(default)]
    pub address_components: Vec<AddressComponent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    #[serde(default)]
    pub place_id: String,

    #[serde(default)]
    pub types: Vec<String>,
}

/// Location geometry of a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    pub location: Coordinates,

    /// Precision of the location ("ROOFTOP", "APPROXIMATE", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
}

/// Trait for geocoding backends
pub trait GeocodeBackend: Send + Sync {
    /// Reverse geocode coordinates to address matches
    fn reverse_geocode(
        &self,
        coords: Coordinates,
    ) -> impl std::future::Future<Output = Result<GeocodeResponse>> + Send;

    /// Geocode an address string to coordinate matches
    fn geocode(
        &self,
        address: &str,
    ) -> impl std::future::Future<Output = Result<GeocodeResponse>> + Send;
}

/// Build the configured geocoding backend
pub fn get_geocoder(config: &crate::config::Config) -> Result<google::GoogleGeocoder> {
    google::GoogleGeocoder::from_config(config)
}
