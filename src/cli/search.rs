//! Search command handler
//!
//! Geocodes an address and shows where the map would pan to.

use crate::cli::init_logging;
use crate::config::Config;
use crate::error::Result;
use crate::geo::get_geocoder;
use crate::geo::lookup::search_location;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Address or place to search for
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Map URL provider (overrides config)
    #[arg(long)]
    pub provider: Option<String>,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    init_logging("warn");

    let config = Config::load()?;
    let geocoder = get_geocoder(&config)?;
    let query = args.query.join(" ");

    let Some(location) = search_location(&geocoder, &query).await? else {
        eprintln!("No match for '{}'", query);
        std::process::exit(1);
    };

    let url = config.format_url(
        args.provider.as_deref(),
        location.lat,
        location.lng,
        config.map.search_zoom,
    )?;

    println!("{}", location.display_name);
    println!("Location: ({:.6}, {:.6})", location.lat, location.lng);
    println!("{}", url);

    Ok(())
}
