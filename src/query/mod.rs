//! Dealer/product discovery pipeline
//!
//! Three stages composed in sequence:
//! - text/category filter (`filter`)
//! - distance from the user's location, when one is known (`coord::distance`)
//! - sort/rank (`sort`)
//!
//! The whole pipeline is a pure function of the record slice, the filter
//! criteria and the optional user coordinate. Callers re-run it whenever
//! any input changes.

pub mod filter;
pub mod sort;

use crate::catalog::Record;
use crate::coord::distance::is_within_radius;
use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Category selector: everything, or a single category label
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl From<&str> for CategoryFilter {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(s.to_lowercase())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<CategoryFilter> for String {
    fn from(c: CategoryFilter) -> Self {
        c.to_string()
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(label) => f.write_str(label),
        }
    }
}

/// Sort key for discovery results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Source order
    #[default]
    Default,
    /// Nearest first (needs a user location)
    Distance,
    /// Highest rated first
    Rating,
    /// Alphabetical by display name
    Name,
}

impl SortKey {
    pub fn all() -> Vec<SortKey> {
        vec![Self::Default, Self::Distance, Self::Rating, Self::Name]
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Distance => write!(f, "distance"),
            Self::Rating => write!(f, "rating"),
            Self::Name => write!(f, "name"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "distance" | "nearest" => Ok(Self::Distance),
            "rating" => Ok(Self::Rating),
            "name" => Ok(Self::Name),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

/// Transient, user-driven filter state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text query (case-insensitive substring)
    #[serde(default)]
    pub query: String,

    #[serde(default)]
    pub category: CategoryFilter,

    #[serde(default)]
    pub sort: SortKey,

    /// Drop hits farther than this from the user (ignored without a location)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,

    /// Keep at most this many hits after ranking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl FilterCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_max_distance_km(mut self, km: f64) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A record that passed the filter, with its distance from the user
#[derive(Debug, Serialize)]
pub struct Hit<'a, R> {
    #[serde(flatten)]
    pub record: &'a R,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl<'a, R> Hit<'a, R> {
    pub fn new(record: &'a R) -> Self {
        Self {
            record,
            distance_km: None,
        }
    }
}

impl<R> Clone for Hit<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Hit<'_, R> {}

/// Ordered, filtered view of the catalog
#[derive(Debug, Serialize)]
pub struct DiscoveryResult<'a, R> {
    hits: Vec<Hit<'a, R>>,

    /// Number of matches before `limit` was applied
    pub total: usize,

    /// Sort key the caller asked for
    pub requested_sort: SortKey,

    /// Sort key actually applied (differs on graceful degradation)
    pub applied_sort: SortKey,

    /// User location used for distances, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Coordinates>,
}

impl<'a, R> DiscoveryResult<'a, R> {
    pub fn hits(&self) -> &[Hit<'a, R>] {
        &self.hits
    }

    pub fn into_hits(self) -> Vec<Hit<'a, R>> {
        self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// The "no results" state; not an error
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Records in ranked order
    pub fn records(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.hits.iter().map(|h| h.record)
    }
}

/// Check a search radius; rejects zero, negatives and NaN
pub fn validate_radius(km: f64) -> Result<f64, String> {
    if km > 0.0 {
        Ok(km)
    } else {
        Err(format!("Radius must be positive, got {}", km))
    }
}

/// Run the full filter → distance → rank pipeline
///
/// # Arguments
/// * `records` - Read-only record collection
/// * `criteria` - Query, category, sort key and optional radius/limit
/// * `user` - The user's location, when one has been acquired
pub fn discover<'a, R: Record>(
    records: &'a [R],
    criteria: &FilterCriteria,
    user: Option<Coordinates>,
) -> DiscoveryResult<'a, R> {
    let matched = filter::filter_records(records, &criteria.query, &criteria.category);

    let mut hits: Vec<Hit<'a, R>> = matched
        .into_iter()
        .map(|record| Hit {
            record,
            distance_km: match (user, record.location()) {
                (Some(u), Some(loc)) => Some(u.distance_km(&loc)),
                _ => None,
            },
        })
        .collect();

    if let (Some(center), Some(max_km)) = (user, criteria.max_distance_km) {
        hits.retain(|h| {
            h.record
                .location()
                .is_some_and(|loc| is_within_radius(loc, center, max_km))
        });
    }

    let (mut hits, applied_sort) = sort::rank(hits, criteria.sort, user.is_some());
    let total = hits.len();

    if let Some(limit) = criteria.limit {
        hits.truncate(limit);
    }

    debug!(
        "Discovery: query={:?} category={} sort={} -> {} of {} records",
        criteria.query,
        criteria.category,
        applied_sort,
        total,
        records.len()
    );

    DiscoveryResult {
        hits,
        total,
        requested_sort: criteria.sort,
        applied_sort,
        origin: user,
    }
}
