//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::lookup::MarkerAddress;

/// Text formatter - the address line followed by its components
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, marker: &MarkerAddress, _config: &Config) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("Address: {}\n", marker.address));
        output.push_str(&format!(
            "Location: ({:.6}, {:.6})\n",
            marker.coords.lat, marker.coords.lng
        ));

        if !marker.record.is_empty() {
            output.push_str("\nComponents:\n");
            let width = marker
                .record
                .iter()
                .map(|(key, _)| key.as_str().len())
                .max()
                .unwrap_or(0);
            for (key, value) in marker.record.iter() {
                output.push_str(&format!("  {:width$}  {}\n", key.as_str(), value, width = width));
            }
        }

        Ok(output)
    }
}
