//! Google Geocoding API backend
//!
//! Requires an API key (config `api_keys.google` or `GOOGLE_MAPS_API_KEY`).
//! Reverse lookups are filtered to `ROOFTOP` precision unless configured
//! otherwise.

use crate::config::Config;
use crate::constants::api::GOOGLE_GEOCODE_URL;
use crate::error::{Error, Result};
use crate::geo::{Coordinates, GeocodeBackend, GeocodeResponse};
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("pin-drop/", env!("CARGO_PKG_VERSION"));

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Google Geocoding API backend
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    location_type: Option<String>,
    language: Option<String>,
    region: Option<String>,
    bias: Option<(Coordinates, Coordinates)>,
}

impl GoogleGeocoder {
    /// Create a backend for the public endpoint with the given key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::Config(
                "Google API key is not configured (set api_keys.google or GOOGLE_MAPS_API_KEY)"
                    .to_string(),
            ));
        }

        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: GOOGLE_GEOCODE_URL.to_string(),
            api_key,
            location_type: None,
            language: None,
            region: None,
            bias: None,
        })
    }

    /// Create a backend from configuration
    ///
    /// Forward lookups are biased to the configured map center and search radius.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.google_api_key().unwrap_or_default();
        let center = Coordinates::new(config.map.center_lat, config.map.center_lng);

        Ok(Self::new(api_key)?
            .with_base_url(&config.geocoding.base_url)
            .with_location_type(&config.geocoding.location_type)
            .with_language(&config.geocoding.language)
            .with_region(&config.geocoding.region)
            .with_bias(center, config.map.search_radius))
    }

    /// Override the API endpoint
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Restrict reverse lookups to a location type (empty clears it)
    pub fn with_location_type(mut self, location_type: &str) -> Self {
        self.location_type = non_empty(location_type);
        self
    }

    /// Request results in a language (empty clears it)
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = non_empty(language);
        self
    }

    /// Bias results to a region code (empty clears it)
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = non_empty(region);
        self
    }

    /// Bias forward lookups to a box `radius` meters around `center`
    pub fn with_bias(mut self, center: Coordinates, radius: f64) -> Self {
        self.bias = (radius > 0.0).then(|| center.bounds(radius));
        self
    }

    /// Build the reverse geocoding request URL
    fn reverse_url(&self, coords: Coordinates) -> String {
        let mut url = format!(
            "{}/json?latlng={},{}&key={}",
            self.base_url,
            coords.lat,
            coords.lng,
            urlencoding::encode(&self.api_key)
        );
        if let Some(location_type) = &self.location_type {
            url.push_str(&format!("&location_type={}", urlencoding::encode(location_type)));
        }
        self.push_locale(&mut url);
        url
    }

    /// Build the forward geocoding request URL
    fn search_url(&self, address: &str) -> String {
        let mut url = format!(
            "{}/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(address),
            urlencoding::encode(&self.api_key)
        );
        if let Some((sw, ne)) = &self.bias {
            let bounds = format!("{},{}|{},{}", sw.lat, sw.lng, ne.lat, ne.lng);
            url.push_str(&format!("&bounds={}", urlencoding::encode(&bounds)));
        }
        self.push_locale(&mut url);
        url
    }

    fn push_locale(&self, url: &mut String) {
        if let Some(language) = &self.language {
            url.push_str(&format!("&language={}", urlencoding::encode(language)));
        }
        if let Some(region) = &self.region {
            url.push_str(&format!("&region={}", urlencoding::encode(region)));
        }
    }

    async fn fetch(&self, url: &str) -> Result<GeocodeResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Geocoding API returned status: {}",
                response.status()
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse geocoding response: {}", e)))?;

        Self::check_status(body)
    }

    /// Map provider status codes to results
    ///
    /// `ZERO_RESULTS` is a successful lookup that matched nothing.
    fn check_status(mut body: GeocodeResponse) -> Result<GeocodeResponse> {
        match body.status.as_str() {
            STATUS_OK => Ok(body),
            STATUS_ZERO_RESULTS => {
                body.results.clear();
                Ok(body)
            }
            status => {
                let detail = body.error_message.as_deref().unwrap_or("no details");
                warn!(status, detail, "Geocoding API rejected request");
                Err(Error::Geocoding(format!("{}: {}", status, detail)))
            }
        }
    }
}

impl GeocodeBackend for GoogleGeocoder {
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<GeocodeResponse> {
        coords.validate()?;
        debug!(lat = coords.lat, lng = coords.lng, "Reverse geocoding");
        self.fetch(&self.reverse_url(coords)).await
    }

    async fn geocode(&self, address: &str) -> Result<GeocodeResponse> {
        debug!(address, "Geocoding");
        self.fetch(&self.search_url(address)).await
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
