//! moto-atlas: dealer and product discovery
//!
//! A library and CLI tool for searching a motorcycle brand's dealer network
//! and product range across Africa.
//!
//! ## Features
//!
//! - Static, read-only dealer and product catalog
//! - Case-insensitive text search with category filtering
//! - Haversine distance ranking from the user's location
//! - Rating and name ordering (always stable)
//! - Map marker feed, image URL resolution, form submission receipts
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use moto_atlas::catalog::Catalog;
//! use moto_atlas::coord::Coordinates;
//! use moto_atlas::query::{discover, FilterCriteria, SortKey};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let accra = Coordinates::new(5.6037, -0.1870);
//!
//! let criteria = FilterCriteria::default().with_sort(SortKey::Distance);
//! let result = discover(catalog.dealers(), &criteria, Some(accra));
//!
//! for hit in result.hits() {
//!     println!("{} ({:?} km)", hit.record.name, hit.distance_km);
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod forms;
pub mod geo;
pub mod map;
pub mod media;
pub mod query;
pub mod server;

// Re-export commonly used types
pub use catalog::{Catalog, Dealer, DealerCategory, Product, ProductCategory, Record};
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use query::{discover, CategoryFilter, DiscoveryResult, FilterCriteria, Hit, SortKey};
