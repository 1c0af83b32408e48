//! Record types for the static catalog

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

/// Common view of a catalog entry used by the discovery pipeline
pub trait Record {
    /// Unique identifier
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Fields matched by the free-text query
    fn search_fields(&self) -> Vec<&str>;

    /// One-line description for listings
    fn detail(&self) -> String;

    /// Category labels this record belongs to
    fn category_labels(&self) -> Vec<&'static str>;

    /// Location, if the record has one
    fn location(&self) -> Option<Coordinates> {
        None
    }

    /// Numeric rating, if any
    fn rating(&self) -> Option<f64> {
        None
    }

    /// Whether the record carries the given category label (case-insensitive)
    fn has_category(&self, label: &str) -> bool {
        self.category_labels()
            .iter()
            .any(|c| c.eq_ignore_ascii_case(label))
    }
}

/// Services offered at a dealership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealerCategory {
    Sales,
    Service,
    Training,
    Spares,
}

impl DealerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Service => "service",
            Self::Training => "training",
            Self::Spares => "spares",
        }
    }

    pub fn all() -> Vec<DealerCategory> {
        vec![Self::Sales, Self::Service, Self::Training, Self::Spares]
    }
}

impl std::fmt::Display for DealerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DealerCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "service" => Ok(Self::Service),
            "training" => Ok(Self::Training),
            "spares" | "parts" => Ok(Self::Spares),
            _ => Err(format!("Unknown dealer category: {}", s)),
        }
    }
}

/// Product line a motorcycle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Commuter,
    Sport,
    Adventure,
    Cargo,
    Electric,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commuter => "commuter",
            Self::Sport => "sport",
            Self::Adventure => "adventure",
            Self::Cargo => "cargo",
            Self::Electric => "electric",
        }
    }

    pub fn all() -> Vec<ProductCategory> {
        vec![
            Self::Commuter,
            Self::Sport,
            Self::Adventure,
            Self::Cargo,
            Self::Electric,
        ]
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "commuter" => Ok(Self::Commuter),
            "sport" => Ok(Self::Sport),
            "adventure" => Ok(Self::Adventure),
            "cargo" => Ok(Self::Cargo),
            "electric" | "ev" => Ok(Self::Electric),
            _ => Err(format!("Unknown product category: {}", s)),
        }
    }
}

/// A dealership in the dealer network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dealer {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub coords: Coordinates,
    pub categories: Vec<DealerCategory>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<String>,
}

impl Record for Dealer {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.city.as_str(),
            self.country.as_str(),
            self.address.as_str(),
        ]
    }

    fn detail(&self) -> String {
        format!("{}, {}, {}", self.address, self.city, self.country)
    }

    fn category_labels(&self) -> Vec<&'static str> {
        self.categories.iter().map(|c| c.as_str()).collect()
    }

    fn location(&self) -> Option<Coordinates> {
        Some(self.coords)
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }
}

/// A motorcycle model in the product range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: ProductCategory,
    pub tagline: String,
    pub description: String,
    pub engine_cc: u32,

    /// Recommended retail price in USD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_usd: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,

    /// Image identifier resolved by `media::ImageResolver`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record for Product {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.tagline.as_str(),
            self.description.as_str(),
        ]
    }

    fn detail(&self) -> String {
        match self.price_usd {
            Some(price) => format!(
                "{}cc {} - {} (USD {})",
                self.engine_cc, self.category, self.tagline, price
            ),
            None => format!("{}cc {} - {}", self.engine_cc, self.category, self.tagline),
        }
    }

    fn category_labels(&self) -> Vec<&'static str> {
        vec![self.category.as_str()]
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_dealer_category_parse() {
        assert_eq!(DealerCategory::from_str("Training"), Ok(DealerCategory::Training));
        assert_eq!(DealerCategory::from_str("parts"), Ok(DealerCategory::Spares));
        assert!(DealerCategory::from_str("racing").is_err());
    }

    #[test]
    fn test_product_category_serde() {
        let json = serde_json::to_string(&ProductCategory::Electric).unwrap();
        assert_eq!(json, "\"electric\"");
        let parsed: ProductCategory = serde_json::from_str("\"cargo\"").unwrap();
        assert_eq!(parsed, ProductCategory::Cargo);
    }

    #[test]
    fn test_has_category_ignores_case() {
        let dealer: Dealer = serde_json::from_value(serde_json::json!({
            "id": "d1",
            "name": "Test Motors",
            "address": "1 Main Rd",
            "city": "Kumasi",
            "country": "Ghana",
            "coords": { "lat": 6.6885, "lng": -1.6244 },
            "categories": ["sales", "training"]
        }))
        .unwrap();

        assert!(dealer.has_category("TRAINING"));
        assert!(!dealer.has_category("spares"));
        assert_eq!(dealer.rating(), None);
        assert_eq!(dealer.search_fields().len(), 4);
    }
}
