//! URL output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{Listing, OutputFormatter};

/// URL formatter - outputs a map URL for the top located result
pub struct UrlFormatter;

impl UrlFormatter {
    /// Format URL with optional provider override
    pub fn format_with_provider(
        &self,
        listing: &Listing,
        config: &Config,
        provider: Option<&str>,
    ) -> Result<String> {
        if listing.rows.is_empty() {
            return Ok(format!("No {} match your search.", listing.title));
        }

        let coords = listing
            .rows
            .iter()
            .find_map(|row| row.coords)
            .ok_or_else(|| Error::NotFound(format!("No located {} to link to", listing.title)))?;

        config.format_url(provider, coords.lat, coords.lng)
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "Map URL for the top result"
    }

    fn format(&self, listing: &Listing, config: &Config) -> Result<String> {
        self.format_with_provider(listing, config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::{dealer_listing, product_listing};

    #[test]
    fn test_url_format_default_provider() {
        let url = UrlFormatter
            .format(&dealer_listing(), &Config::default())
            .unwrap();
        assert!(url.contains("google.com"));
        assert!(url.contains("5.6037,-0.187"));
    }

    #[test]
    fn test_url_format_with_provider() {
        let url = UrlFormatter
            .format_with_provider(&dealer_listing(), &Config::default(), Some("openstreetmap"))
            .unwrap();
        assert!(url.contains("openstreetmap.org"));
    }

    #[test]
    fn test_url_format_no_results() {
        let mut listing = dealer_listing();
        listing.rows.clear();
        listing.total = 0;

        let out = UrlFormatter.format(&listing, &Config::default()).unwrap();
        assert_eq!(out, "No dealers match your search.");
    }

    #[test]
    fn test_url_format_without_locations() {
        let result = UrlFormatter.format(&product_listing(), &Config::default());
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
