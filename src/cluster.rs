//! Greedy capacity-constrained route clustering.
//!
//! # Algorithm
//!
//! Seeds routes farthest-from-depot-first, then accretes each seed's
//! nearest unrouted neighbors while they fit the remaining capacity:
//!
//! 1. Sort stops by depot distance, descending.
//! 2. Each unrouted stop in that order seeds a new route sized against the
//!    smallest vehicle type. A seed too heavy for that type escalates
//!    through the fleet; a seed too heavy for every type still gets its
//!    own route, flagged for manual splitting.
//! 3. Walk the seed's adjacency list in ascending-distance order, stopping
//!    at the first neighbor past [`NEIGHBOR_CUTOFF_MILES`] (the list is
//!    sorted, so everything after it is farther). Unrouted neighbors that
//!    fit the remaining capacity are accepted first-fit, with no
//!    backtracking or reordering.
//! 4. A finished route is labeled with the smallest vehicle type whose
//!    capacity covers its total load.
//!
//! Farthest-first seeding isolates outlying stops into their own small
//! routes early, so a remote delivery does not end up inside a route that
//! can no longer absorb the stops around it. First-fit by distance favors
//! geographic tightness over load packing, matching how the trucks are
//! actually driven.
//!
//! # Complexity
//!
//! O(N²) over the adjacency lists, dominated by the walk in step 3.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;

use crate::adjacency::Adjacency;
use crate::models::{Fleet, Route, RoutePlan, Stop};

/// Neighbors farther than this from a route's seed are never added to it.
pub const NEIGHBOR_CUTOFF_MILES: f64 = 3.0;

/// Partitions every stop into capacity-constrained routes.
///
/// `stops` must all be resolved (geocoded, with a depot distance); the
/// caller excludes unresolved stops and records them on the plan
/// separately. Every stop ends up in exactly one route. The output is
/// deterministic: seeding order ties are broken by id, and adjacency
/// lists carry their own tie-breaking.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use bagroute::adjacency::Adjacency;
/// use bagroute::cluster::cluster;
/// use bagroute::geo::GeoPoint;
/// use bagroute::models::{Fleet, Stop, VehicleType};
///
/// let mut near = Stop::new("near", "n", "a", 60);
/// near.set_location(GeoPoint::new(38.91, -77.40), 1.0);
/// let mut far = Stop::new("far", "f", "b", 60);
/// far.set_location(GeoPoint::new(39.10, -77.40), 14.0);
///
/// let stops: BTreeMap<String, Stop> =
///     [near, far].into_iter().map(|s| (s.id.clone(), s)).collect();
/// let adjacency = Adjacency::build(&stops.values().cloned().collect::<Vec<_>>());
/// let fleet = Fleet::new(vec![VehicleType::new("Box Truck", 135)]).unwrap();
///
/// let plan = cluster(&stops, &adjacency, &fleet);
/// // 13 miles apart: the cutoff keeps them on separate routes,
/// // and the far stop seeds first.
/// assert_eq!(plan.num_routes(), 2);
/// assert_eq!(plan.routes()[0].stop_ids(), ["far"]);
/// ```
pub fn cluster(stops: &BTreeMap<String, Stop>, adjacency: &Adjacency, fleet: &Fleet) -> RoutePlan {
    let mut order: Vec<&Stop> = stops.values().collect();
    order.sort_by(|a, b| {
        let da = a.depot_distance_miles.unwrap_or(0.0);
        let db = b.depot_distance_miles.unwrap_or(0.0);
        db.partial_cmp(&da)
            .expect("depot distances are finite")
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut planned: BTreeSet<String> = BTreeSet::new();
    let mut plan = RoutePlan::new();

    for seed in &order {
        if planned.contains(&seed.id) {
            continue;
        }

        let mut route = Route::seeded(&seed.id, seed.load);
        let mut remaining = seed_capacity(&mut route, seed, fleet);

        if let Some(neighbors) = adjacency.neighbors(&seed.id) {
            for neighbor in neighbors {
                if neighbor.miles > NEIGHBOR_CUTOFF_MILES {
                    // Lists ascend by distance: everything after this
                    // neighbor is farther, so stop scanning entirely.
                    break;
                }
                if planned.contains(&neighbor.id) || route.contains(&neighbor.id) {
                    continue;
                }
                let Some(stop) = stops.get(&neighbor.id) else {
                    continue;
                };
                if remaining - i64::from(stop.load) >= 0 {
                    route.push(&stop.id, stop.load);
                    remaining -= i64::from(stop.load);
                }
            }
        }

        match fleet.for_load(route.total_load()) {
            Some(vehicle) => route.set_vehicle(&vehicle.label),
            None => route.mark_overflow(),
        }

        for id in route.stop_ids() {
            planned.insert(id.clone());
        }
        plan.add_route(route);
    }

    plan
}

/// Determines the seed route's starting capacity, escalating through the
/// fleet when the seed alone overflows the smallest vehicle. Accretion
/// never escalates; only the seed's own load can force a bigger truck.
fn seed_capacity(route: &mut Route, seed: &Stop, fleet: &Fleet) -> i64 {
    let load = i64::from(seed.load);
    let mut remaining = i64::from(fleet.smallest().capacity) - load;

    for vehicle in fleet.types().iter().skip(1) {
        if remaining >= 0 {
            break;
        }
        warn!(
            "stop {} ({} bags) overflows smaller vehicles; trying {} ({} bags)",
            seed.id, seed.load, vehicle.label, vehicle.capacity
        );
        remaining = i64::from(vehicle.capacity) - load;
    }

    if remaining < 0 {
        warn!(
            "stop {} ({} bags) exceeds every vehicle capacity (max {}); route flagged for manual splitting",
            seed.id,
            seed.load,
            fleet.largest().capacity
        );
        route.mark_overflow();
    }

    remaining
}
