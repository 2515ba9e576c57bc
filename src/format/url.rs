//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::lookup::MarkerAddress;

/// URL formatter - outputs a map URL centered on the marker
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        marker: &MarkerAddress,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        config.format_url(
            provider,
            marker.coords.lat,
            marker.coords.lng,
            config.map.search_zoom,
        )
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for the marker"
    }

    fn format(&self, marker: &MarkerAddress, config: &Config) -> Result<String> {
        self.format_with_provider(marker, config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::sample_marker;

    #[test]
    fn test_url_format_default_provider() {
        let output = UrlFormatter
            .format(&sample_marker(), &Config::default())
            .unwrap();

        assert_eq!(output, "https://www.google.com/maps/@6.9271,79.8612,14z");
    }

    #[test]
    fn test_url_format_with_provider() {
        let output = UrlFormatter
            .format_with_provider(&sample_marker(), &Config::default(), Some("openstreetmap"))
            .unwrap();

        assert!(output.contains("openstreetmap.org"));
    }

    #[test]
    fn test_url_format_unknown_provider() {
        let result =
            UrlFormatter.format_with_provider(&sample_marker(), &Config::default(), Some("bing"));
        assert!(result.is_err());
    }
}
