//! Great-circle distance
//!
//! Spherical-earth approximation; good to well under 1% for the distances a
//! dealer search cares about.

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::coord::Coordinates;

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// Symmetric in its arguments; the distance from a point to itself is zero.
pub fn haversine_km(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Check if a point is within `radius_km` of a center
pub fn is_within_radius(point: Coordinates, center: Coordinates, radius_km: f64) -> bool {
    haversine_km(point, center) <= radius_km
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ACCRA: Coordinates = Coordinates { lat: 5.6037, lng: -0.1870 };
    const LAGOS: Coordinates = Coordinates { lat: 6.5244, lng: 3.3792 };
    const NAIROBI: Coordinates = Coordinates { lat: -1.2921, lng: 36.8219 };

    #[test]
    fn test_distance_to_self_is_zero() {
        for p in [ACCRA, LAGOS, NAIROBI, Coordinates::new(-89.9, 179.9)] {
            assert_abs_diff_eq!(haversine_km(p, p), 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [(ACCRA, LAGOS), (LAGOS, NAIROBI), (NAIROBI, ACCRA)];
        for (a, b) in pairs {
            assert_eq!(haversine_km(a, b), haversine_km(b, a));
        }
    }

    #[test]
    fn test_one_degree_latitude() {
        let north = Coordinates::new(ACCRA.lat + 1.0, ACCRA.lng);
        let distance = haversine_km(ACCRA, north);
        assert!(
            (distance - 111.0).abs() < 1.0,
            "Distance {} should be approximately 111 km",
            distance
        );
    }

    #[test]
    fn test_accra_to_lagos() {
        // Roughly 400 km along the coast
        let distance = haversine_km(ACCRA, LAGOS);
        assert!(distance > 380.0 && distance < 420.0, "got {}", distance);
    }

    #[test]
    fn test_is_within_radius() {
        assert!(is_within_radius(ACCRA, ACCRA, 0.0));
        assert!(is_within_radius(LAGOS, ACCRA, 500.0));
        assert!(!is_within_radius(NAIROBI, ACCRA, 500.0));
    }
}
