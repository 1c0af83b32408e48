//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "defaults.sort")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,

    /// List available keys
    #[arg(long)]
    pub keys: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.keys {
        for k in Config::available_keys() {
            println!("{}", k);
        }
        return Ok(());
    }

    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        (None, None) => {
            show_all_config(&config);
        }

        (Some(key), None) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => {
                eprintln!("Available keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        },

        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[defaults]");
    println!("sort = \"{}\"", config.defaults.sort);
    println!("format = \"{}\"", config.defaults.format);
    println!("limit = {}", config.defaults.limit);
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!("static_dir = \"{}\"", config.server.static_dir);
    println!();

    println!("[catalog]");
    if config.catalog.path.is_empty() {
        println!("path = \"\" # built-in catalog");
    } else {
        println!("path = \"{}\"", config.catalog.path);
    }
    println!();

    println!("[location]");
    println!("enabled = {}", config.location.enabled);
    println!("timeout_secs = {}", config.location.timeout_secs);
    println!();

    println!("[map]");
    if config.map.access_token.is_empty() {
        println!("access_token = \"\" # not configured, map disabled");
    } else {
        println!("access_token = \"***\" # configured");
    }
    println!("style = \"{}\"", config.map.style);
    println!();

    println!("[map.colors]");
    let mut colors: Vec<_> = config.map.colors.iter().collect();
    colors.sort();
    for (category, color) in colors {
        println!("{} = \"{}\"", category, color);
    }
    println!();

    println!("[media]");
    if config.media.cloud_name.is_empty() {
        println!("cloud_name = \"\" # not configured, serving {}", config.media.static_prefix);
    } else {
        println!("cloud_name = \"{}\"", config.media.cloud_name);
    }
    println!("transformation = \"{}\"", config.media.transformation);
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    for (name, template) in &config.url.providers {
        println!("{} = \"{}\"", name, template);
    }
}
