//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// A geographic coordinate in decimal degrees.
///
/// # Examples
///
/// ```
/// use bagroute::geo::{great_circle_miles, GeoPoint};
///
/// let berlin = GeoPoint::new(52.5200, 13.4050);
/// let paris = GeoPoint::new(48.8566, 2.3522);
/// let miles = great_circle_miles(berlin, paris);
/// assert!((miles - 545.0).abs() < 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` if both components are finite and in range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Great-circle distance between two coordinates, in statute miles.
///
/// Uses the haversine formula. Pure and symmetric; identical points yield
/// `0.0` and antipodal points yield a finite half-circumference.
pub fn great_circle_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h just past 1.0 for antipodal inputs.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_points_zero() {
        let p = GeoPoint::new(38.950633, -77.397684);
        assert_eq!(great_circle_miles(p, p), 0.0);
    }

    #[test]
    fn test_known_distance() {
        // Berlin to Paris is roughly 878 km = 545.6 miles.
        let berlin = GeoPoint::new(52.5200, 13.4050);
        let paris = GeoPoint::new(48.8566, 2.3522);
        let miles = great_circle_miles(berlin, paris);
        assert!((miles - 545.6).abs() < 6.0, "got {miles}");
    }

    #[test]
    fn test_antipodal_finite() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let miles = great_circle_miles(a, b);
        assert!(miles.is_finite());
        // Half the equatorial circumference at the mean radius.
        let half = std::f64::consts::PI * EARTH_RADIUS_MILES;
        assert!((miles - half).abs() < 1.0, "got {miles}");
    }

    #[test]
    fn test_one_degree_latitude() {
        let a = GeoPoint::new(38.0, -77.0);
        let b = GeoPoint::new(39.0, -77.0);
        let miles = great_circle_miles(a, b);
        // One degree of latitude is about 69.1 miles.
        assert!((miles - 69.1).abs() < 0.5, "got {miles}");
    }

    #[test]
    fn test_is_valid() {
        assert!(GeoPoint::new(38.9, -77.4).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }

    proptest! {
        #[test]
        fn prop_symmetric(
            lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
        ) {
            let a = GeoPoint::new(lat1, lon1);
            let b = GeoPoint::new(lat2, lon2);
            let ab = great_circle_miles(a, b);
            let ba = great_circle_miles(b, a);
            prop_assert!((ab - ba).abs() < 1e-9);
            prop_assert!(ab >= 0.0);
            prop_assert!(ab.is_finite());
        }
    }
}
