//! Static dealer and product catalog
//!
//! The catalog is loaded once (from the embedded data files or a JSON file
//! named in config) and never mutated afterwards. The server shares it
//! behind an `Arc`.

pub mod record;

pub use record::{Dealer, DealerCategory, Product, ProductCategory, Record};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const BUILTIN_DEALERS: &str = include_str!("../../data/dealers.json");
const BUILTIN_PRODUCTS: &str = include_str!("../../data/products.json");

/// Read-only collection of dealers and products
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    dealers: Vec<Dealer>,
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from record lists, rejecting duplicate ids
    pub fn new(dealers: Vec<Dealer>, products: Vec<Product>) -> Result<Self> {
        check_unique("dealer", &dealers)?;
        check_unique("product", &products)?;
        for dealer in &dealers {
            dealer.coords.validate().map_err(|e| {
                Error::Catalog(format!("Dealer {} has bad coordinates: {}", dealer.id, e))
            })?;
        }
        Ok(Self { dealers, products })
    }

    /// Load the catalog embedded in the binary
    pub fn builtin() -> Result<Self> {
        let dealers: Vec<Dealer> = serde_json::from_str(BUILTIN_DEALERS)
            .map_err(|e| Error::Catalog(format!("Failed to parse built-in dealers: {}", e)))?;
        let products: Vec<Product> = serde_json::from_str(BUILTIN_PRODUCTS)
            .map_err(|e| Error::Catalog(format!("Failed to parse built-in products: {}", e)))?;
        debug!(
            "Parsed built-in catalog: {} dealers, {} products",
            dealers.len(),
            products.len()
        );
        Self::new(dealers, products)
    }

    /// Load a catalog from a JSON file of the form `{"dealers": [...], "products": [...]}`
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let raw: Catalog = serde_json::from_str(&content).map_err(|e| {
            Error::Catalog(format!("Failed to parse catalog {}: {}", path.display(), e))
        })?;
        Self::new(raw.dealers, raw.products)
    }

    /// Load the configured catalog, falling back to the embedded one
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(p) => Self::from_path(p)?,
            None => Self::builtin()?,
        };
        info!(
            "Loaded catalog with {} dealers and {} products",
            catalog.dealers.len(),
            catalog.products.len()
        );
        Ok(catalog)
    }

    pub fn dealers(&self) -> &[Dealer] {
        &self.dealers
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a dealer by id
    pub fn dealer(&self, id: &str) -> Option<&Dealer> {
        self.dealers.iter().find(|d| d.id == id)
    }

    /// Look up a product by id
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Countries with at least one dealer, in first-seen order
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.dealers
            .iter()
            .map(|d| d.country.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

fn check_unique<R: Record>(kind: &str, records: &[R]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            return Err(Error::Catalog(format!(
                "Duplicate {} id: {}",
                kind,
                record.id()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.dealers().is_empty());
        assert!(!catalog.products().is_empty());
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::builtin().unwrap();
        let first = &catalog.dealers()[0];
        assert_eq!(catalog.dealer(&first.id), Some(first));
        assert!(catalog.dealer("no-such-dealer").is_none());
        assert!(catalog.product("no-such-product").is_none());
    }

    #[test]
    fn test_countries_are_unique() {
        let catalog = Catalog::builtin().unwrap();
        let countries = catalog.countries();
        let unique: HashSet<_> = countries.iter().collect();
        assert_eq!(countries.len(), unique.len());
        assert!(countries.contains(&"Ghana"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let catalog = Catalog::builtin().unwrap();
        let mut dealers = catalog.dealers().to_vec();
        dealers.push(dealers[0].clone());
        let result = Catalog::new(dealers, Vec::new());
        assert!(matches!(result, Err(Error::Catalog(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"dealers": [{{
                "id": "kumasi",
                "name": "Ashanti Riders",
                "address": "12 Harper Rd",
                "city": "Kumasi",
                "country": "Ghana",
                "coords": {{"lat": 6.6885, "lng": -1.6244}},
                "categories": ["sales"]
            }}]}}"#
        )
        .unwrap();

        let catalog = Catalog::from_path(file.path()).unwrap();
        assert_eq!(catalog.dealers().len(), 1);
        assert!(catalog.products().is_empty());
    }

    #[test]
    fn test_from_path_bad_coordinates() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"dealers": [{{
                "id": "nowhere",
                "name": "Nowhere",
                "address": "",
                "city": "",
                "country": "",
                "coords": {{"lat": 95.0, "lng": 0.0}},
                "categories": []
            }}]}}"#
        )
        .unwrap();

        assert!(Catalog::from_path(file.path()).is_err());
    }
}
