//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants;

/// Default Google Geocoding API endpoint
pub const DEFAULT_GEOCODE_URL: &str = constants::api::GOOGLE_GEOCODE_URL;

/// Default location type filter for reverse geocoding
pub const DEFAULT_LOCATION_TYPE: &str = "ROOFTOP";

/// Default base URL of the address backend
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:7878";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "google";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "pin-drop";
