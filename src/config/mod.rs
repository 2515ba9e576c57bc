//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/pin-drop/config.toml

pub mod defaults;

use crate::constants::api::GOOGLE_API_KEY_ENV;
use crate::constants::map;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding provider settings
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Address backend the CLI talks to
    #[serde(default)]
    pub backend: BackendConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Map view settings
    #[serde(default)]
    pub map: MapConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,

    /// API keys for various services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Geocoding API endpoint (without the trailing `/json`)
    #[serde(default = "default_geocode_url")]
    pub base_url: String,

    /// Location type filter for reverse geocoding (empty disables it)
    #[serde(default = "default_location_type")]
    pub location_type: String,

    /// Result language (empty uses the provider default)
    #[serde(default)]
    pub language: String,

    /// Region bias as a ccTLD code (empty for none)
    #[serde(default)]
    pub region: String,
}

/// Address backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend hosting the `address` resource
    #[serde(default = "default_backend_url")]
    pub base_url: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address store file (empty uses the XDG data directory)
    #[serde(default)]
    pub data_file: String,
}

/// Map view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lng")]
    pub center_lng: f64,

    /// Initial zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Zoom level used when showing a search result
    #[serde(default = "default_search_zoom")]
    pub search_zoom: u8,

    /// Search bias radius around the center, in meters
    #[serde(default = "default_search_radius")]
    pub search_radius: f64,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format for looked-up addresses
    #[serde(default = "default_format")]
    pub format: String,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Google Maps Platform API key
    #[serde(default)]
    pub google: String,
}

// Default value functions for serde
fn default_geocode_url() -> String {
    DEFAULT_GEOCODE_URL.to_string()
}
fn default_location_type() -> String {
    DEFAULT_LOCATION_TYPE.to_string()
}
fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_center_lat() -> f64 {
    map::CENTER_LAT
}
fn default_center_lng() -> f64 {
    map::CENTER_LNG
}
fn default_zoom() -> u8 {
    map::ZOOM
}
fn default_search_zoom() -> u8 {
    map::SEARCH_ZOOM
}
fn default_search_radius() -> f64 {
    map::SEARCH_RADIUS_METERS
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},{zoom}z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map={zoom}/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}&z={zoom}".to_string(),
    );
    providers
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocode_url(),
            location_type: default_location_type(),
            language: String::new(),
            region: String::new(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_file: String::new(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
            search_zoom: default_search_zoom(),
            search_radius: default_search_radius(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path()?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Google API key, preferring the environment over the config file
    pub fn google_api_key(&self) -> Option<String> {
        std::env::var(GOOGLE_API_KEY_ENV)
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| Some(self.api_keys.google.clone()).filter(|k| !k.is_empty()))
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoding", "base_url"] => Some(self.geocoding.base_url.clone()),
            ["geocoding", "location_type"] => Some(self.geocoding.location_type.clone()),
            ["geocoding", "language"] => Some(self.geocoding.language.clone()),
            ["geocoding", "region"] => Some(self.geocoding.region.clone()),

            ["backend", "base_url"] => Some(self.backend.base_url.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),
            ["server", "data_file"] => Some(self.server.data_file.clone()),

            ["map", "center_lat"] => Some(self.map.center_lat.to_string()),
            ["map", "center_lng"] => Some(self.map.center_lng.to_string()),
            ["map", "zoom"] => Some(self.map.zoom.to_string()),
            ["map", "search_zoom"] => Some(self.map.search_zoom.to_string()),
            ["map", "search_radius"] => Some(self.map.search_radius.to_string()),

            ["output", "format"] => Some(self.output.format.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            ["api_keys", "google"] => Some(self.api_keys.google.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoding", "base_url"] => {
                self.geocoding.base_url = value.to_string();
            }
            ["geocoding", "location_type"] => {
                self.geocoding.location_type = value.to_uppercase();
            }
            ["geocoding", "language"] => {
                self.geocoding.language = value.to_string();
            }
            ["geocoding", "region"] => {
                self.geocoding.region = value.to_string();
            }

            ["backend", "base_url"] => {
                self.backend.base_url = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }
            ["server", "data_file"] => {
                self.server.data_file = value.to_string();
            }

            ["map", "center_lat"] => {
                self.map.center_lat = parse_degrees(value, 90.0)?;
            }
            ["map", "center_lng"] => {
                self.map.center_lng = parse_degrees(value, 180.0)?;
            }
            ["map", "zoom"] => {
                self.map.zoom = parse_zoom(value)?;
            }
            ["map", "search_zoom"] => {
                self.map.search_zoom = parse_zoom(value)?;
            }
            ["map", "search_radius"] => {
                self.map.search_radius = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid radius value: {}", value))
                })?;
            }

            ["output", "format"] => {
                self.output.format = value.to_string();
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            ["api_keys", "google"] => {
                self.api_keys.google = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "geocoding.base_url",
            "geocoding.location_type",
            "geocoding.language",
            "geocoding.region",
            "backend.base_url",
            "server.host",
            "server.port",
            "server.data_file",
            "map.center_lat",
            "map.center_lng",
            "map.zoom",
            "map.search_zoom",
            "map.search_radius",
            "output.format",
            "url.default",
            "api_keys.google",
        ]
    }

    /// Format a map URL using the specified provider
    ///
    /// Replaces {lat}, {lng} and {zoom} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64, zoom: u8) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string())
            .replace("{zoom}", &zoom.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_degrees(value: &str, limit: f64) -> Result<f64> {
    let degrees: f64 = value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid coordinate value: {}", value)))?;
    if !(-limit..=limit).contains(&degrees) {
        return Err(Error::Config(format!(
            "Coordinate {} is out of range [-{}, {}]",
            degrees, limit, limit
        )));
    }
    Ok(degrees)
}

fn parse_zoom(value: &str) -> Result<u8> {
    match value.parse::<u8>() {
        Ok(zoom) if zoom <= 21 => Ok(zoom),
        _ => Err(Error::Config(format!("Invalid zoom value: {}", value))),
    }
}
