//! Dealers command handler
//!
//! Searches the dealer network and prints the ranked result.

use crate::catalog::{Catalog, DealerCategory};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, Listing};
use crate::geo::{get_geocoder, GeoBackend, LocationSession, Locator};
use crate::query::{discover, validate_radius, FilterCriteria, SortKey};
use clap::Args;
use std::str::FromStr;
use tracing::info;

/// Dealers command arguments
#[derive(Args)]
pub struct DealersArgs {
    /// Free-text search (name, city, country, address)
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Category: sales, service, training, spares or all
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Sort: default, distance, rating or name
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Your latitude
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Your longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Place name to search near (geocoded)
    #[arg(long, conflicts_with_all = ["lat", "lng", "here"])]
    pub near: Option<String>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng", "near"])]
    pub here: bool,

    /// Only dealers within this many kilometers
    #[arg(long, short = 'r')]
    pub radius_km: Option<f64>,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,

    /// List dealer categories
    #[arg(short = 'C', long = "list-categories")]
    pub list_categories: bool,
}

/// Run the dealers command
pub async fn run(args: DealersArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    if args.list_categories {
        list_categories();
        return Ok(());
    }

    super::init_logging("warn");

    let config = Config::load()?;
    let catalog = Catalog::load(config.catalog_path().as_deref())?;

    let origin = resolve_origin(&args, &config).await?;

    let sort_str = args.sort.clone().unwrap_or_else(|| config.defaults.sort.clone());
    let sort = SortKey::from_str(&sort_str).map_err(Error::Config)?;

    let mut criteria = FilterCriteria::default()
        .with_query(args.query.clone().unwrap_or_default())
        .with_category(args.category.clone().unwrap_or_default())
        .with_sort(sort);

    if let Some(km) = args.radius_km {
        let km = validate_radius(km).map_err(Error::Config)?;
        criteria = criteria.with_max_distance_km(km);
    }
    match args.limit.unwrap_or(config.defaults.limit) {
        0 => {}
        n => criteria = criteria.with_limit(n),
    }

    let result = discover(catalog.dealers(), &criteria, origin);
    let listing = Listing::from_result("dealers", &result);

    let format = args.format.unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;
    let output = formatter.format(&listing, &config)?;

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

/// Work out where the user is, if they told us
///
/// A failed `--here` lookup prints the user-facing message and carries on
/// without a location.
async fn resolve_origin(args: &DealersArgs, config: &Config) -> Result<Option<Coordinates>> {
    if let Some(coords) = Coordinates::from_parts(args.lat, args.lng)? {
        return Ok(Some(coords));
    }

    if let Some(place) = &args.near {
        let geocoder = get_geocoder()?;
        return match geocoder.geocode(place).await? {
            Some(location) => {
                eprintln!("Searching near: {}", location.display_name);
                Ok(Some(location.coords()))
            }
            None => Err(Error::Geocoding(format!("Could not find '{}'", place))),
        };
    }

    if args.here {
        let session = LocationSession::new(Locator::from_config(config), config.location_timeout());
        return match session.locate().await {
            Ok(location) => {
                info!("Using IP location: {}", location.display_name);
                eprintln!("Using your location: {}", location.display_name);
                Ok(Some(location.coords()))
            }
            Err(e) => {
                eprintln!("{}", e.user_message());
                Ok(None)
            }
        };
    }

    Ok(None)
}

/// Print available dealer categories
fn list_categories() {
    println!("Dealer categories:");
    for category in DealerCategory::all() {
        println!("  {}", category);
    }
}

/// Print available output formats
pub(crate) fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
