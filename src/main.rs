//! pin-drop CLI entry point
//!
//! Map address picker - CLI + address backend

use pin_drop::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
