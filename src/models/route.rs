//! Route type.

use serde::{Deserialize, Serialize};

/// An ordered group of stop ids delivered together by one vehicle.
///
/// The first id is the seed stop the route was built around. A route is
/// flagged as overflow when its seed's load exceeds every configured
/// vehicle capacity; such routes are still emitted so the partition stays
/// complete, and are resolved manually downstream.
///
/// # Examples
///
/// ```
/// use bagroute::models::Route;
///
/// let mut route = Route::seeded("BD-9", 40);
/// route.push("BD-4", 25);
/// assert_eq!(route.total_load(), 65);
/// assert!(route.contains("BD-4"));
/// assert!(!route.overflow());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    stop_ids: Vec<String>,
    total_load: u32,
    vehicle: Option<String>,
    overflow: bool,
}

impl Route {
    /// Creates a route seeded by a single stop.
    pub fn seeded(seed_id: impl Into<String>, seed_load: u32) -> Self {
        Self {
            stop_ids: vec![seed_id.into()],
            total_load: seed_load,
            vehicle: None,
            overflow: false,
        }
    }

    /// Appends a stop to the route.
    pub fn push(&mut self, id: impl Into<String>, load: u32) {
        self.stop_ids.push(id.into());
        self.total_load += load;
    }

    /// Returns `true` if the route already contains the given stop.
    pub fn contains(&self, id: &str) -> bool {
        self.stop_ids.iter().any(|s| s == id)
    }

    /// Stop ids in delivery order (seed first).
    pub fn stop_ids(&self) -> &[String] {
        &self.stop_ids
    }

    /// Number of stops on this route.
    pub fn len(&self) -> usize {
        self.stop_ids.len()
    }

    /// Returns `true` if the route has no stops (never holds after `seeded`).
    pub fn is_empty(&self) -> bool {
        self.stop_ids.is_empty()
    }

    /// Total bag count across the route's stops.
    pub fn total_load(&self) -> u32 {
        self.total_load
    }

    /// Assigned vehicle label, `None` when no type covers the total load.
    pub fn vehicle(&self) -> Option<&str> {
        self.vehicle.as_deref()
    }

    /// Sets the assigned vehicle label.
    pub fn set_vehicle(&mut self, label: impl Into<String>) {
        self.vehicle = Some(label.into());
    }

    /// Returns `true` if the route needs manual splitting.
    pub fn overflow(&self) -> bool {
        self.overflow
    }

    /// Flags the route for manual resolution.
    pub fn mark_overflow(&mut self) {
        self.overflow = true;
    }
}
