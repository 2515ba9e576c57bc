//! Output formatters
//!
//! Provides trait-based output formatting for looked-up marker addresses.

pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::geo::lookup::MarkerAddress;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a marker address
    ///
    /// # Arguments
    /// * `marker` - The marker address to format
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, marker: &MarkerAddress, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        &json::JsonFormatter as &dyn OutputFormatter,
        &text::TextFormatter,
        &url::UrlFormatter,
    ]
    .into_iter()
    .map(|f| FormatInfo {
        name: f.name().to_string(),
        description: f.description().to_string(),
    })
    .collect()
}

#[cfg(test)]
pub(crate) fn sample_marker() -> MarkerAddress {
    use crate::address::{normalize, AddressComponent};
    use crate::geo::Coordinates;

    let record = normalize(
        &[
            AddressComponent::new("12", &["street_number"]),
            AddressComponent::new("Galle Road", &["route"]),
            AddressComponent::new("Colombo", &["locality", "political"]),
            AddressComponent::new("Sri Lanka", &["country", "political"]),
        ],
        "12 Galle Rd, Colombo, Sri Lanka",
    );

    MarkerAddress {
        coords: Coordinates::new(6.9271, 79.8612),
        address: "12 Galle Rd, Colombo, Sri Lanka".to_string(),
        record,
    }
}
