//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod list;
pub mod pin;
pub mod search;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Drop a pin, reverse-geocode it, and keep the address
#[derive(Parser)]
#[command(name = "pin-drop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the address at a coordinate and save it
    Pin(pin::PinArgs),

    /// Find the location of an address
    Search(search::SearchArgs),

    /// List saved addresses
    List(list::ListArgs),

    /// Start the address backend (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Initialize logging to stderr
///
/// `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pin(args) => pin::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::List(args) => list::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
