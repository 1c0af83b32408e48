//! Centralized constants for the moto-atlas crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers (spherical approximation)
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// Cloudinary-style image delivery base
    pub const IMAGE_CDN_URL: &str = "https://res.cloudinary.com";

    /// User agent sent to third-party APIs
    pub const USER_AGENT: &str = concat!("moto-atlas/", env!("CARGO_PKG_VERSION"));
}
