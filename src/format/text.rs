//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{Listing, OutputFormatter};

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, listing: &Listing, _config: &Config) -> Result<String> {
        let mut output = String::new();

        if listing.rows.is_empty() {
            output.push_str(&format!("No {} match your search.\n", listing.title));
            return Ok(output);
        }

        output.push_str(&format!(
            "{} {} (sorted by {})\n",
            listing.total, listing.title, listing.applied_sort
        ));
        if listing.applied_sort != listing.requested_sort {
            output.push_str(&format!(
                "Note: {} ordering needs your location; showing {} order.\n",
                listing.requested_sort, listing.applied_sort
            ));
        }
        if let Some(origin) = listing.origin {
            output.push_str(&format!("From: {}\n", origin));
        }
        output.push('\n');

        for (i, row) in listing.rows.iter().enumerate() {
            output.push_str(&format!("{:>3}. {}", i + 1, row.name));
            if let Some(rating) = row.rating {
                output.push_str(&format!("  ★ {:.1}", rating));
            }
            if let Some(d) = row.distance_km {
                output.push_str(&format!("  {:.1} km", d));
            }
            output.push('\n');
            output.push_str(&format!("     {}\n", row.detail));
            if !row.categories.is_empty() {
                output.push_str(&format!("     [{}]\n", row.categories.join(", ")));
            }
        }

        if listing.rows.len() < listing.total {
            output.push_str(&format!(
                "\n... and {} more\n",
                listing.total - listing.rows.len()
            ));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::{dealer_listing, product_listing};

    #[test]
    fn test_text_format() {
        let output = TextFormatter
            .format(&dealer_listing(), &Config::default())
            .unwrap();

        assert!(output.contains("sorted by distance"));
        assert!(output.contains("From: (5.6037, -0.1870)"));
        assert!(output.contains("  1. Gold Coast Motors"));
        assert!(output.contains("0.0 km"));
        assert!(output.contains("more"));
    }

    #[test]
    fn test_text_empty_state() {
        let mut listing = product_listing();
        listing.rows.clear();
        listing.total = 0;

        let output = TextFormatter.format(&listing, &Config::default()).unwrap();
        assert_eq!(output, "No products match your search.\n");
    }

    #[test]
    fn test_text_degraded_sort_note() {
        let mut listing = product_listing();
        listing.requested_sort = crate::query::SortKey::Distance;

        let output = TextFormatter.format(&listing, &Config::default()).unwrap();
        assert!(output.contains("needs your location"));
    }
}
