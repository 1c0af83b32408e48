//! Error types for moto-atlas

use crate::geo::GeolocationError;
use thiserror::Error;

/// Main error type for moto-atlas operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Geolocation error: {0}")]
    Geolocation(#[from] GeolocationError),

    #[error("Map unavailable: {0}")]
    MapUnavailable(String),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for moto-atlas operations
pub type Result<T> = std::result::Result<T, Error>;
