//! Marker address lookup
//!
//! Composes a geocoding backend with the address normalizer: a dropped pin
//! becomes a [`MarkerAddress`], a search query becomes a [`GeoLocation`].

use crate::address::{normalize, AddressRecord};
use crate::error::Result;
use crate::geo::{Coordinates, GeoLocation, GeocodeBackend};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The address found for a map marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerAddress {
    /// Where the marker was dropped
    pub coords: Coordinates,

    /// Human-readable address line
    pub address: String,

    /// Normalized record, ready to be stored
    pub record: AddressRecord,
}

/// Reverse geocode a marker and normalize the best match
///
/// Returns `None` when the provider has no result for the point.
pub async fn lookup_marker_address<G: GeocodeBackend>(
    geocoder: &G,
    coords: Coordinates,
) -> Result<Option<MarkerAddress>> {
    let response = geocoder.reverse_geocode(coords).await?;

    let Some(best) = response.first() else {
        debug!(lat = coords.lat, lng = coords.lng, "No address for marker");
        return Ok(None);
    };

    let record = normalize(&best.address_components, &best.formatted_address);
    debug!(
        lat = coords.lat,
        lng = coords.lng,
        address = %best.formatted_address,
        "Resolved marker address"
    );

    Ok(Some(MarkerAddress {
        coords,
        address: best.formatted_address.clone(),
        record,
    }))
}

/// Geocode a search query to the location of its best match
///
/// Returns `None` when nothing matches or the match has no geometry.
pub async fn search_location<G: GeocodeBackend>(
    geocoder: &G,
    query: &str,
) -> Result<Option<GeoLocation>> {
    let response = geocoder.geocode(query).await?;

    Ok(response.first().and_then(|best| {
        best.geometry.as_ref().map(|geometry| GeoLocation {
            lat: geometry.location.lat,
            lng: geometry.location.lng,
            display_name: best.formatted_address.clone(),
        })
    }))
}
