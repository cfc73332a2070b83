//! Pairwise great-circle adjacency lists.
//!
//! For every resolved stop, an adjacency list holds every other stop
//! ordered by ascending distance. The clustering engine relies on that
//! sort order to short-circuit its neighbor scan at the distance cutoff,
//! so the ordering here is a correctness invariant, not a convenience.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::great_circle_miles;
use crate::models::Stop;

/// One entry in a stop's adjacency list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// The neighboring stop's id.
    pub id: String,
    /// Great-circle distance to that stop in miles.
    pub miles: f64,
}

impl Neighbor {
    /// Creates a neighbor entry.
    pub fn new(id: impl Into<String>, miles: f64) -> Self {
        Self {
            id: id.into(),
            miles,
        }
    }
}

/// Per-stop neighbor lists, each ascending by distance.
///
/// Building is O(N²) pairs, which is fine for the low hundreds of stops a
/// run sees. The result is persisted and reused when the recorded stop
/// count matches the current run (a deliberately coarse staleness check).
///
/// # Examples
///
/// ```
/// use bagroute::adjacency::Adjacency;
/// use bagroute::geo::GeoPoint;
/// use bagroute::models::Stop;
///
/// let mut a = Stop::new("A", "A", "a", 1);
/// a.set_location(GeoPoint::new(38.90, -77.40), 0.0);
/// let mut b = Stop::new("B", "B", "b", 1);
/// b.set_location(GeoPoint::new(38.92, -77.40), 1.4);
///
/// let adj = Adjacency::build(&[a, b]);
/// assert_eq!(adj.len(), 2);
/// let neighbors = adj.neighbors("A").unwrap();
/// assert_eq!(neighbors[0].id, "B");
/// assert!(neighbors[0].miles > 1.0 && neighbors[0].miles < 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjacency {
    lists: BTreeMap<String, Vec<Neighbor>>,
}

impl Adjacency {
    /// Computes adjacency lists for all resolved stops.
    ///
    /// Each pair's distance is computed once and recorded symmetrically,
    /// then every list is sorted ascending by distance (ties broken by id
    /// so repeated runs produce identical output). Stops without a
    /// coordinate cannot be placed and are skipped.
    pub fn build(stops: &[Stop]) -> Self {
        let located: Vec<&Stop> = stops.iter().filter(|s| s.location.is_some()).collect();

        let mut lists: BTreeMap<String, Vec<Neighbor>> = located
            .iter()
            .map(|s| (s.id.clone(), Vec::with_capacity(located.len() - 1)))
            .collect();

        for (i, a) in located.iter().enumerate() {
            for b in located.iter().skip(i + 1) {
                let miles = match (a.location, b.location) {
                    (Some(pa), Some(pb)) => great_circle_miles(pa, pb),
                    _ => continue,
                };
                lists
                    .get_mut(&a.id)
                    .expect("list exists for every located stop")
                    .push(Neighbor::new(&b.id, miles));
                lists
                    .get_mut(&b.id)
                    .expect("list exists for every located stop")
                    .push(Neighbor::new(&a.id, miles));
            }
        }

        for list in lists.values_mut() {
            list.sort_by(|x, y| {
                x.miles
                    .partial_cmp(&y.miles)
                    .expect("distances are finite")
                    .then_with(|| x.id.cmp(&y.id))
            });
        }

        Self { lists }
    }

    /// Creates an adjacency from pre-computed lists, re-sorting each one.
    pub fn from_lists(lists: BTreeMap<String, Vec<Neighbor>>) -> Self {
        let mut adjacency = Self { lists };
        for list in adjacency.lists.values_mut() {
            list.sort_by(|x, y| {
                x.miles
                    .partial_cmp(&y.miles)
                    .expect("distances are finite")
                    .then_with(|| x.id.cmp(&y.id))
            });
        }
        adjacency
    }

    /// Number of stops with a neighbor list.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` if no lists are present.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// The neighbor list for a stop, ascending by distance.
    pub fn neighbors(&self, id: &str) -> Option<&[Neighbor]> {
        self.lists.get(id).map(Vec::as_slice)
    }

    /// Coarse staleness check: a persisted adjacency is reused only when
    /// its recorded stop count equals the current count. This does not
    /// compare contents; see the module docs for the accepted risk.
    pub fn is_fresh_for(&self, stop_count: usize) -> bool {
        self.lists.len() == stop_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    // Roughly 69.1 miles per degree of latitude; longitude held fixed so
    // distances are easy to reason about.
    fn stop_at(id: &str, miles_north: f64) -> Stop {
        let mut s = Stop::new(id, id, format!("{id} street"), 1);
        s.set_location(
            GeoPoint::new(38.0 + miles_north / 69.1, -77.4),
            miles_north.abs(),
        );
        s
    }

    #[test]
    fn test_build_sizes() {
        let stops = vec![stop_at("A", 0.0), stop_at("B", 1.0), stop_at("C", 5.0)];
        let adj = Adjacency::build(&stops);
        assert_eq!(adj.len(), 3);
        for id in ["A", "B", "C"] {
            assert_eq!(adj.neighbors(id).expect("list").len(), 2);
        }
    }

    #[test]
    fn test_lists_ascend_by_distance() {
        let stops = vec![stop_at("A", 0.0), stop_at("B", 4.0), stop_at("C", 1.0)];
        let adj = Adjacency::build(&stops);
        let from_a = adj.neighbors("A").expect("list");
        assert_eq!(from_a[0].id, "C");
        assert_eq!(from_a[1].id, "B");
        assert!(from_a[0].miles <= from_a[1].miles);
    }

    #[test]
    fn test_symmetric_distances() {
        let stops = vec![stop_at("A", 0.0), stop_at("B", 2.5)];
        let adj = Adjacency::build(&stops);
        let ab = adj.neighbors("A").expect("list")[0].miles;
        let ba = adj.neighbors("B").expect("list")[0].miles;
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_unresolved_stops_skipped() {
        let stops = vec![
            stop_at("A", 0.0),
            Stop::new("X", "X", "nowhere", 1),
            stop_at("B", 1.0),
        ];
        let adj = Adjacency::build(&stops);
        assert_eq!(adj.len(), 2);
        assert!(adj.neighbors("X").is_none());
    }

    #[test]
    fn test_staleness_check() {
        let stops = vec![stop_at("A", 0.0), stop_at("B", 1.0)];
        let adj = Adjacency::build(&stops);
        assert!(adj.is_fresh_for(2));
        assert!(!adj.is_fresh_for(3));
    }

    #[test]
    fn test_from_lists_sorts() {
        let mut lists = BTreeMap::new();
        lists.insert(
            "A".to_string(),
            vec![Neighbor::new("far", 9.0), Neighbor::new("near", 0.5)],
        );
        let adj = Adjacency::from_lists(lists);
        let from_a = adj.neighbors("A").expect("list");
        assert_eq!(from_a[0].id, "near");
    }

    #[test]
    fn test_distance_tie_broken_by_id() {
        let mut lists = BTreeMap::new();
        lists.insert(
            "A".to_string(),
            vec![Neighbor::new("zz", 1.0), Neighbor::new("aa", 1.0)],
        );
        let adj = Adjacency::from_lists(lists);
        let from_a = adj.neighbors("A").expect("list");
        assert_eq!(from_a[0].id, "aa");
        assert_eq!(from_a[1].id, "zz");
    }

    #[test]
    fn test_serde_round_trip() {
        let stops = vec![stop_at("A", 0.0), stop_at("B", 1.0)];
        let adj = Adjacency::build(&stops);
        let json = serde_json::to_string(&adj).expect("serialize");
        let back: Adjacency = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, adj);
    }
}
