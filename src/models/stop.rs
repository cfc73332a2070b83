//! Delivery stop type.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// A single delivery stop parsed from one input row.
///
/// The coordinate and depot distance start out unset and are populated
/// exactly once, either from the persisted stop cache or by a geocoder
/// call. After resolution a stop is treated as immutable for the rest of
/// the run.
///
/// # Examples
///
/// ```
/// use bagroute::geo::GeoPoint;
/// use bagroute::models::Stop;
///
/// let mut stop = Stop::new("BD-17", "A. Household", "12 Oak St, Herndon, VA 20170", 12);
/// assert!(!stop.is_resolved());
///
/// stop.set_location(GeoPoint::new(38.96, -77.38), 1.4);
/// assert!(stop.is_resolved());
/// assert_eq!(stop.depot_distance_miles, Some(1.4));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Business key; unique within a run and stable across runs.
    pub id: String,
    /// Recipient name (display only).
    pub name: String,
    /// Full formatted address used for geocoding and display.
    pub address: String,
    /// Free-form delivery notes.
    #[serde(default)]
    pub comments: String,
    /// Bag count. Zero is a reportable anomaly, not an error.
    pub load: u32,
    /// Geocoded coordinate, absent until resolved.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Great-circle distance from the depot in miles, derived and cached.
    #[serde(default)]
    pub depot_distance_miles: Option<f64>,
}

impl Stop {
    /// Creates an unresolved stop.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        load: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            comments: String::new(),
            load,
            location: None,
            depot_distance_miles: None,
        }
    }

    /// Sets delivery comments.
    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    /// Returns `true` once the stop has a coordinate and depot distance.
    pub fn is_resolved(&self) -> bool {
        self.location.is_some() && self.depot_distance_miles.is_some()
    }

    /// Populates the geocoded coordinate and depot distance.
    pub fn set_location(&mut self, location: GeoPoint, depot_distance_miles: f64) {
        self.location = Some(location);
        self.depot_distance_miles = Some(depot_distance_miles);
    }
}
