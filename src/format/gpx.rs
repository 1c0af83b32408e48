//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{Listing, OutputFormatter};

/// GPX formatter - outputs a waypoint per located result
pub struct GpxFormatter;

/// Escape the five XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file of located results"
    }

    fn format(&self, listing: &Listing, _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="moto-atlas">"#);
        gpx.push('\n');

        gpx.push_str("  <metadata>\n");
        gpx.push_str(&format!("    <name>moto-atlas {}</name>\n", escape_xml(&listing.title)));
        gpx.push_str("  </metadata>\n");

        if let Some(origin) = listing.origin {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                origin.lat, origin.lng
            ));
            gpx.push('\n');
            gpx.push_str("    <name>You are here</name>\n");
            gpx.push_str("  </wpt>\n");
        }

        for row in &listing.rows {
            let Some(coords) = row.coords else {
                continue;
            };
            gpx.push_str(&format!(r#"  <wpt lat="{}" lon="{}">"#, coords.lat, coords.lng));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape_xml(&row.name)));
            gpx.push_str(&format!("    <desc>{}</desc>\n", escape_xml(&row.detail)));
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");

        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::{dealer_listing, product_listing};

    #[test]
    fn test_gpx_format() {
        let output = GpxFormatter
            .format(&dealer_listing(), &Config::default())
            .unwrap();

        assert!(output.starts_with("<?xml"));
        assert!(output.contains("<gpx version=\"1.1\""));
        assert!(output.contains("You are here"));
        // origin + three dealers
        assert_eq!(output.matches("<wpt ").count(), 4);
        assert!(output.trim_end().ends_with("</gpx>"));
    }

    #[test]
    fn test_gpx_skips_unlocated_rows() {
        let output = GpxFormatter
            .format(&product_listing(), &Config::default())
            .unwrap();
        assert_eq!(output.matches("<wpt ").count(), 0);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("A & B <C>"), "A &amp; B &lt;C&gt;");
        assert_eq!(escape_xml("Côte d'Ivoire"), "Côte d&apos;Ivoire");
    }
}
