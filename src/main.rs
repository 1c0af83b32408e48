//! moto-atlas CLI entry point
//!
//! Dealer and product discovery - CLI + web API

use moto_atlas::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
