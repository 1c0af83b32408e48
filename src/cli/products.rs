//! Products command handler

use crate::catalog::{Catalog, ProductCategory};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{get_formatter, Listing};
use crate::query::{discover, FilterCriteria, SortKey};
use clap::Args;
use std::str::FromStr;

/// Products command arguments
#[derive(Args)]
pub struct ProductsArgs {
    /// Free-text search (name, tagline, description)
    #[arg(long, short = 'q')]
    pub query: Option<String>,

    /// Category: commuter, sport, adventure, cargo, electric or all
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Sort: default, rating or name
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    /// Output format (json or text)
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,

    /// List product categories
    #[arg(short = 'C', long = "list-categories")]
    pub list_categories: bool,
}

/// Run the products command
pub fn run(args: ProductsArgs) -> Result<()> {
    if args.list_formats {
        super::dealers::list_formats();
        return Ok(());
    }

    if args.list_categories {
        println!("Product categories:");
        for category in ProductCategory::all() {
            println!("  {}", category);
        }
        return Ok(());
    }

    super::init_logging("warn");

    let config = Config::load()?;
    let catalog = Catalog::load(config.catalog_path().as_deref())?;

    let sort_str = args.sort.unwrap_or_else(|| config.defaults.sort.clone());
    let sort = SortKey::from_str(&sort_str).map_err(Error::Config)?;

    let criteria = FilterCriteria::default()
        .with_query(args.query.unwrap_or_default())
        .with_category(args.category.unwrap_or_default())
        .with_sort(sort);

    let result = discover(catalog.products(), &criteria, None);
    let listing = Listing::from_result("products", &result);

    let format = args.format.unwrap_or_else(|| config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;
    print!("{}", formatter.format(&listing, &config)?);

    Ok(())
}
