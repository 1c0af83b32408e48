//! Map widget feed
//!
//! Turns a ranked dealer list into the marker payload consumed by the
//! client-side map, plus the category legend. The map cannot be shown
//! without an access token; that failure is reported as
//! `Error::MapUnavailable` so callers can render a diagnostic instead.

use crate::catalog::Record;
use crate::config::defaults::DEFAULT_MARKER_COLOR;
use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::query::Hit;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single marker on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub coords: Coordinates,
    /// Color of the record's first category
    pub color: String,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

/// Legend entry for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: String,
}

/// Everything the map widget needs to render
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapFeed {
    pub access_token: String,
    pub style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Coordinates>,
    pub markers: Vec<Marker>,
    pub legend: Vec<LegendEntry>,
}

/// Category label to marker color
#[derive(Debug, Clone)]
pub struct ColorScheme {
    colors: HashMap<String, String>,
}

impl ColorScheme {
    pub fn new(colors: HashMap<String, String>) -> Self {
        let colors = colors
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        Self { colors }
    }

    /// Color for a category, falling back to a neutral gray
    pub fn color_for(&self, category: &str) -> &str {
        self.colors
            .get(&category.to_lowercase())
            .map(String::as_str)
            .unwrap_or(DEFAULT_MARKER_COLOR)
    }

    /// Marker color for a record: its first category's color
    pub fn marker_color<R: Record>(&self, record: &R) -> &str {
        record
            .category_labels()
            .first()
            .map(|c| self.color_for(c))
            .unwrap_or(DEFAULT_MARKER_COLOR)
    }
}

impl MapFeed {
    /// Build the feed for a ranked list of located records
    ///
    /// Records without a location are skipped. `center` is usually the
    /// user's location; otherwise the first marker is used.
    pub fn build<R: Record>(
        config: &Config,
        hits: &[Hit<'_, R>],
        center: Option<Coordinates>,
        categories: &[&str],
    ) -> Result<Self> {
        let token = config.map.access_token.trim();
        if token.is_empty() {
            return Err(Error::MapUnavailable(
                "No map access token configured (set map.access_token)".to_string(),
            ));
        }

        let scheme = ColorScheme::new(config.map.colors.clone());

        let markers: Vec<Marker> = hits
            .iter()
            .filter_map(|hit| {
                let coords = hit.record.location()?;
                Some(Marker {
                    id: hit.record.id().to_string(),
                    name: hit.record.name().to_string(),
                    coords,
                    color: scheme.marker_color(hit.record).to_string(),
                    categories: hit
                        .record
                        .category_labels()
                        .into_iter()
                        .map(String::from)
                        .collect(),
                    distance_km: hit.distance_km,
                })
            })
            .collect();

        let legend = categories
            .iter()
            .map(|c| LegendEntry {
                category: c.to_string(),
                color: scheme.color_for(c).to_string(),
            })
            .collect();

        let center = center.or_else(|| markers.first().map(|m| m.coords));

        Ok(Self {
            access_token: token.to_string(),
            style: config.map.style.clone(),
            center,
            markers,
            legend,
        })
    }

    /// Handle a "record selected" event from the widget
    pub fn select(&self, id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, DealerCategory};
    use crate::query::{discover, FilterCriteria};

    fn config_with_token() -> Config {
        let mut config = Config::default();
        config.map.access_token = "pk.test-token".to_string();
        config
    }

    fn dealer_categories() -> Vec<&'static str> {
        DealerCategory::all().iter().map(|c| c.as_str()).collect()
    }

    #[test]
    fn test_missing_token_is_map_unavailable() {
        let catalog = Catalog::builtin().unwrap();
        let result = discover(catalog.dealers(), &FilterCriteria::default(), None);

        let err = MapFeed::build(&Config::default(), result.hits(), None, &dealer_categories())
            .unwrap_err();
        assert!(matches!(err, Error::MapUnavailable(_)));
    }

    #[test]
    fn test_build_feed() {
        let catalog = Catalog::builtin().unwrap();
        let result = discover(catalog.dealers(), &FilterCriteria::default(), None);
        let feed = MapFeed::build(&config_with_token(), result.hits(), None, &dealer_categories())
            .unwrap();

        assert_eq!(feed.markers.len(), catalog.dealers().len());
        assert_eq!(feed.legend.len(), 4);
        assert_eq!(feed.center, Some(catalog.dealers()[0].coords));

        // First built-in dealer lists "sales" first
        assert_eq!(feed.markers[0].color, "#dc2626");
    }

    #[test]
    fn test_products_have_no_markers() {
        let catalog = Catalog::builtin().unwrap();
        let result = discover(catalog.products(), &FilterCriteria::default(), None);
        let feed = MapFeed::build(&config_with_token(), result.hits(), None, &[]).unwrap();
        assert!(feed.markers.is_empty());
        assert!(feed.center.is_none());
    }

    #[test]
    fn test_select_marker() {
        let catalog = Catalog::builtin().unwrap();
        let result = discover(catalog.dealers(), &FilterCriteria::default(), None);
        let feed = MapFeed::build(&config_with_token(), result.hits(), None, &[]).unwrap();

        let id = &catalog.dealers()[2].id;
        assert_eq!(feed.select(id).map(|m| &m.id), Some(id));
        assert!(feed.select("missing").is_none());
    }

    #[test]
    fn test_color_scheme_fallback() {
        let scheme = ColorScheme::new(HashMap::from([(
            "Service".to_string(),
            "#123456".to_string(),
        )]));
        assert_eq!(scheme.color_for("service"), "#123456");
        assert_eq!(scheme.color_for("racing"), DEFAULT_MARKER_COLOR);
    }
}
