//! Output formatters
//!
//! Provides trait-based output formatting for discovery results.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::catalog::Record;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::query::{DiscoveryResult, SortKey};
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// One ranked record, flattened for output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub name: String,
    pub detail: String,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Owned, format-independent view of a discovery result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// What was searched ("dealers", "products")
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Coordinates>,
    pub requested_sort: SortKey,
    pub applied_sort: SortKey,
    pub total: usize,
    pub rows: Vec<Row>,
}

impl Listing {
    pub fn from_result<R: Record>(title: &str, result: &DiscoveryResult<'_, R>) -> Self {
        let rows = result
            .hits()
            .iter()
            .map(|hit| Row {
                id: hit.record.id().to_string(),
                name: hit.record.name().to_string(),
                detail: hit.record.detail(),
                categories: hit
                    .record
                    .category_labels()
                    .into_iter()
                    .map(String::from)
                    .collect(),
                coords: hit.record.location(),
                rating: hit.record.rating(),
                distance_km: hit.distance_km,
            })
            .collect();

        Self {
            title: title.to_string(),
            origin: result.origin,
            requested_sort: result.requested_sort,
            applied_sort: result.applied_sort,
            total: result.total,
            rows,
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a listing
    ///
    /// # Arguments
    /// * `listing` - The ranked records to format
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, listing: &Listing, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON listing".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
        FormatInfo {
            name: "gpx".to_string(),
            description: "GPX waypoint file of located results".to_string(),
        },
        FormatInfo {
            name: "url".to_string(),
            description: "Map URL for the top result".to_string(),
        },
    ]
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("gpx").is_some());
        assert!(get_formatter("url").is_some());
        assert!(get_formatter("unknown").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("Text").is_some());
        assert!(get_formatter("GPX").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 4);
        for f in &formats {
            assert!(get_formatter(&f.name).is_some());
        }
    }

    #[test]
    fn test_listing_from_result() {
        let listing = test_support::dealer_listing();
        assert_eq!(listing.rows.len(), 3);
        assert_eq!(listing.rows[0].name, "Gold Coast Motors");
        assert_eq!(listing.applied_sort, SortKey::Distance);
        assert!(listing.total > 3);
    }
}
