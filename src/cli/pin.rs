//! Pin command handler
//!
//! Reverse-geocodes a coordinate, prints the address, and saves it to the
//! backend.

use crate::cli::init_logging;
use crate::config::Config;
use crate::constants::ADDRESS_NOT_FOUND;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::lookup::lookup_marker_address;
use crate::geo::{get_geocoder, Coordinates};
use crate::service::AddressService;
use clap::Args;

/// Pin command arguments
#[derive(Args)]
pub struct PinArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true, required_unless_present = "list_formats")]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, allow_negative_numbers = true, required_unless_present = "list_formats")]
    pub lng: Option<f64>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Don't save the address to the backend
    #[arg(long)]
    pub no_save: bool,

    /// Backend base URL (overrides config)
    #[arg(long)]
    pub backend: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the pin command
pub async fn run(args: PinArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    init_logging("warn");

    let config = Config::load()?;

    let (Some(lat), Some(lng)) = (args.lat, args.lng) else {
        return Err(Error::InvalidCoordinates("Both --lat and --lng are required".to_string()));
    };
    let coords = Coordinates::new(lat, lng);
    coords.validate()?;

    let format = args.format.unwrap_or_else(|| config.output.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let geocoder = get_geocoder(&config)?;
    let Some(marker) = lookup_marker_address(&geocoder, coords).await? else {
        println!("{}", ADDRESS_NOT_FOUND);
        return Ok(());
    };

    let output = formatter.format(&marker, &config)?;
    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    if !args.no_save {
        let service = match &args.backend {
            Some(url) => AddressService::new(url),
            None => AddressService::from_config(&config),
        };
        let stored = service.create(&marker.record).await?;
        eprintln!("Saved address {}", stored.id);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
