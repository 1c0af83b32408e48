//! Geographic coordinates and distance math

pub mod distance;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude) in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Build validated coordinates from an optional lat/lng pair
    ///
    /// Returns `Ok(None)` when both halves are absent and an error when
    /// only one of them is given.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Result<Option<Self>> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => {
                let coords = Self::new(lat, lng);
                coords.validate()?;
                Ok(Some(coords))
            }
            (None, None) => Ok(None),
            _ => Err(Error::InvalidCoordinates(
                "Both latitude and longitude are required".to_string(),
            )),
        }
    }

    /// Distance to another coordinate in kilometers
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        distance::haversine_km(*self, *other)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}
