//! List command handler
//!
//! Shows the addresses saved on the backend.

use crate::cli::init_logging;
use crate::config::Config;
use crate::error::Result;
use crate::service::AddressService;
use clap::Args;

/// List command arguments
#[derive(Args)]
pub struct ListArgs {
    /// Backend base URL (overrides config)
    #[arg(long)]
    pub backend: Option<String>,

    /// Print full records as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the list command
pub async fn run(args: ListArgs) -> Result<()> {
    init_logging("warn");

    let config = Config::load()?;
    let service = match &args.backend {
        Some(url) => AddressService::new(url),
        None => AddressService::from_config(&config),
    };

    let addresses = service.get_all().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&addresses)?);
        return Ok(());
    }

    if addresses.is_empty() {
        println!("No addresses.");
        return Ok(());
    }

    println!("Addresses ({}):\n", addresses.len());
    for entry in &addresses {
        let line = entry.record.formatted_address.as_deref().unwrap_or("(no address)");
        println!("  {}  {}", short_id(&entry.id), line);
    }

    Ok(())
}

/// Leading eight characters of an id, which need not be ASCII
fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}
