//! JSON output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::lookup::MarkerAddress;

/// JSON formatter - outputs the full marker address as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON marker address"
    }

    fn format(&self, marker: &MarkerAddress, _config: &Config) -> Result<String> {
        Ok(serde_json::to_string_pretty(marker)?)
    }
}
