//! Geolocation
//!
//! Acquires the user's coordinates (IP lookup, explicit coordinates, or a
//! disabled provider) and resolves place names via geocoding.

pub mod ip_location;
pub mod nominatim;
pub mod session;

pub use session::LocationSession;

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown to users for every geolocation failure
pub const LOCATION_FAILED_MESSAGE: &str =
    "We couldn't determine your location. Please allow location access or search by city instead.";

/// A located position with a human-readable label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

impl GeoLocation {
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Why a location request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("location request timed out")]
    Timeout,
}

impl GeolocationError {
    /// The single user-facing message for all failure kinds
    pub fn user_message(&self) -> &'static str {
        LOCATION_FAILED_MESSAGE
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::PositionUnavailable => "POSITION_UNAVAILABLE",
            Self::Timeout => "TIMEOUT",
        }
    }
}

/// Outcome of one location request
pub type LocationResult = std::result::Result<GeoLocation, GeolocationError>;

/// Source of the user's current position
pub trait LocationProvider: Send + Sync {
    /// Short name for logs and status output
    fn name(&self) -> &'static str;

    /// Request the current position once
    fn locate(
        &self,
    ) -> impl std::future::Future<Output = LocationResult> + Send;
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode a location string to coordinates
    ///
    /// Returns the best match for the query, or None if not found
    fn geocode(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<GeoLocation>>> + Send;
}

/// Fixed coordinates supplied by the caller
#[derive(Debug, Clone)]
pub struct FixedLocation(pub GeoLocation);

impl FixedLocation {
    pub fn new(coords: Coordinates, display_name: impl Into<String>) -> Self {
        Self(GeoLocation {
            lat: coords.lat,
            lng: coords.lng,
            display_name: display_name.into(),
        })
    }
}

impl LocationProvider for FixedLocation {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn locate(&self) -> LocationResult {
        Ok(self.0.clone())
    }
}

/// Provider used when location sharing is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedLocation;

impl LocationProvider for DeniedLocation {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn locate(&self) -> LocationResult {
        Err(GeolocationError::PermissionDenied)
    }
}

/// Provider selected from configuration
#[derive(Debug, Clone)]
pub enum Locator {
    Ip(ip_location::IpLocator),
    Fixed(FixedLocation),
    Denied(DeniedLocation),
}

impl Locator {
    /// IP lookup when location is enabled, otherwise always denied
    pub fn from_config(config: &crate::config::Config) -> Self {
        if config.location.enabled {
            Self::Ip(ip_location::IpLocator::new())
        } else {
            Self::Denied(DeniedLocation)
        }
    }
}

impl LocationProvider for Locator {
    fn name(&self) -> &'static str {
        match self {
            Self::Ip(p) => p.name(),
            Self::Fixed(p) => p.name(),
            Self::Denied(p) => p.name(),
        }
    }

    async fn locate(&self) -> LocationResult {
        match self {
            Self::Ip(p) => p.locate().await,
            Self::Fixed(p) => p.locate().await,
            Self::Denied(p) => p.locate().await,
        }
    }
}

/// Get the default geocoding backend
pub fn get_geocoder() -> Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_geo_location_serialization() {
        let loc = GeoLocation {
            lat: 5.6037,
            lng: -0.1870,
            display_name: "Accra, Ghana".to_string(),
        };

        let json = serde_json::to_string(&loc).unwrap();
        let parsed: GeoLocation = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, loc);
        assert_eq!(parsed.coords(), Coordinates::new(5.6037, -0.1870));
    }

    #[test]
    fn test_single_user_message() {
        let kinds = [
            GeolocationError::PermissionDenied,
            GeolocationError::PositionUnavailable,
            GeolocationError::Timeout,
        ];
        for kind in kinds {
            assert_eq!(kind.user_message(), LOCATION_FAILED_MESSAGE);
        }
        assert_eq!(GeolocationError::Timeout.code(), "TIMEOUT");
    }

    #[tokio::test]
    async fn test_fixed_and_denied_providers() {
        let fixed = FixedLocation::new(Coordinates::new(-1.2921, 36.8219), "Nairobi");
        assert_eq!(fixed.locate().await.unwrap().display_name, "Nairobi");

        assert_eq!(
            DeniedLocation.locate().await,
            Err(GeolocationError::PermissionDenied)
        );
    }

    #[test]
    fn test_locator_from_config() {
        let mut config = Config::default();
        config.location.enabled = false;
        let locator = Locator::from_config(&config);
        assert_eq!(locator.name(), "disabled");

        config.location.enabled = true;
        let locator = Locator::from_config(&config);
        assert_eq!(locator.name(), "ip");
    }
}
