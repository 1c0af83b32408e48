//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod dealers;
pub mod products;
pub mod serve;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Dealer and product discovery
#[derive(Parser)]
#[command(name = "moto-atlas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the dealer network
    Dealers(dealers::DealersArgs),

    /// Search the product range
    Products(products::ProductsArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Initialize logging to stderr; `RUST_LOG` overrides `default_level`
pub fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dealers(args) => dealers::run(args).await,
        Commands::Products(args) => products::run(args),
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}
