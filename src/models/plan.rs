//! Route plan: the full partition produced by clustering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::Route;

/// The complete output of a clustering run.
///
/// Holds the ordered routes plus the ids of stops that could not be
/// geocoded and were excluded from clustering. Every routable stop must
/// appear in exactly one route; [`RoutePlan::validate_partition`] enforces
/// this before any artifact is rendered.
///
/// # Examples
///
/// ```
/// use bagroute::models::{Route, RoutePlan};
///
/// let mut plan = RoutePlan::new();
/// plan.add_route(Route::seeded("BD-1", 20));
/// assert_eq!(plan.num_routes(), 1);
/// assert_eq!(plan.num_stops(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    routes: Vec<Route>,
    unresolved: Vec<String>,
}

impl RoutePlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finished route.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Records a stop that was excluded because geocoding failed.
    pub fn add_unresolved(&mut self, id: impl Into<String>) {
        self.unresolved.push(id.into());
    }

    /// The routes in creation order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Ids excluded from clustering.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    /// Number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of stops assigned across all routes.
    pub fn num_stops(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Total bag count across all routes.
    pub fn total_load(&self) -> u32 {
        self.routes.iter().map(|r| r.total_load()).sum()
    }

    /// Number of routes flagged for manual resolution.
    pub fn num_overflow(&self) -> usize {
        self.routes.iter().filter(|r| r.overflow()).count()
    }

    /// Checks that the plan is an exact partition of `expected`.
    ///
    /// Fails if any stop id appears in more than one route (a clustering
    /// or persistence bug) or if an expected id is missing from every
    /// route. Both are fatal; the run must stop before rendering.
    pub fn validate_partition(&self, expected: &BTreeSet<String>) -> Result<()> {
        let mut seen = BTreeSet::new();
        for route in &self.routes {
            for id in route.stop_ids() {
                if !seen.insert(id.clone()) {
                    return Err(Error::DuplicateAssignment { id: id.clone() });
                }
            }
        }
        for id in expected {
            if !seen.contains(id) {
                return Err(Error::UnassignedStop { id: id.clone() });
            }
        }
        Ok(())
    }
}
