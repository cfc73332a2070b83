//! Address resolution with an at-most-once cache policy.
//!
//! Geocoding is paid and rate-limited, so a stop id that has ever been
//! resolved is never geocoded again: cache hits reuse the stored
//! coordinate and depot distance verbatim, even if the input address text
//! has since changed. That staleness is a deliberate tradeoff; deleting
//! the stop cache forces re-resolution.
//!
//! Calls are strictly sequential. A provider failure leaves the stop
//! unresolved; unresolved stops are excluded from clustering and surfaced
//! loudly in the run summary rather than aborting the run.

mod google;
mod smarty;

pub use google::GoogleGeocoder;
pub use smarty::SmartyGeocoder;

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{great_circle_miles, GeoPoint};
use crate::models::Stop;

/// Resolves a full address string to a coordinate.
pub trait Geocoder {
    /// Returns the coordinate for an address, or an error when the
    /// provider finds no usable result.
    fn geocode(&self, address: &str) -> Result<GeoPoint>;
}

/// Selects a provider from configuration.
///
/// Google takes precedence when its API key is configured; otherwise
/// SmartyStreets is used when both of its credentials are present.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn Geocoder>> {
    if let Some(key) = config.google_api_key() {
        info!("geocoding with Google");
        return Ok(Box::new(GoogleGeocoder::new(key)?));
    }
    if let (Some(auth_id), Some(auth_token)) = (config.smarty_auth_id(), config.smarty_auth_token())
    {
        info!("geocoding with SmartyStreets");
        return Ok(Box::new(SmartyGeocoder::new(auth_id, auth_token)?));
    }
    Err(Error::NoProvider)
}

/// Resolves every stop's coordinate and depot distance.
///
/// Stops whose id appears in `cache` reuse the cached coordinate and
/// depot distance without touching the geocoder. The rest are geocoded
/// one at a time; failures are logged and collected rather than
/// propagated. Returns the resolved stops in input order plus the ids
/// that could not be resolved.
pub fn resolve_all(
    stops: Vec<Stop>,
    cache: &BTreeMap<String, Stop>,
    geocoder: &dyn Geocoder,
    depot: GeoPoint,
) -> (Vec<Stop>, Vec<String>) {
    let mut resolved = Vec::with_capacity(stops.len());
    let mut unresolved = Vec::new();

    for mut stop in stops {
        if let Some(cached) = cache.get(&stop.id).filter(|c| c.is_resolved()) {
            let location = cached.location.expect("checked is_resolved");
            let miles = cached.depot_distance_miles.expect("checked is_resolved");
            debug!("cache hit for {}", stop.id);
            stop.set_location(location, miles);
            resolved.push(stop);
            continue;
        }

        debug!("geocoding {} ({})", stop.id, stop.address);
        match geocoder.geocode(&stop.address) {
            Ok(location) => {
                let miles = great_circle_miles(depot, location);
                stop.set_location(location, miles);
                resolved.push(stop);
            }
            Err(err) => {
                warn!("could not geocode {} ({}): {err}", stop.id, stop.address);
                unresolved.push(stop.id);
            }
        }
    }

    (resolved, unresolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted geocoder: a fixed coordinate per known address.
    struct Scripted {
        known: BTreeMap<String, GeoPoint>,
        calls: Mutex<usize>,
    }

    impl Scripted {
        fn new(entries: &[(&str, GeoPoint)]) -> Self {
            Self {
                known: entries
                    .iter()
                    .map(|(addr, point)| (addr.to_string(), *point))
                    .collect(),
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().expect("lock")
        }
    }

    impl Geocoder for Scripted {
        fn geocode(&self, address: &str) -> Result<GeoPoint> {
            *self.calls.lock().expect("lock") += 1;
            self.known
                .get(address)
                .copied()
                .ok_or_else(|| Error::Geocode(format!("no result for {address:?}")))
        }
    }

    const DEPOT: GeoPoint = GeoPoint {
        latitude: 38.950633,
        longitude: -77.397684,
    };

    #[test]
    fn test_miss_geocodes_and_derives_distance() {
        let geocoder = Scripted::new(&[("1 Main St, Town, VA 20170", GeoPoint::new(39.0, -77.4))]);
        let stops = vec![Stop::new("BD-1", "Alice", "1 Main St, Town, VA 20170", 5)];

        let (resolved, unresolved) = resolve_all(stops, &BTreeMap::new(), &geocoder, DEPOT);

        assert!(unresolved.is_empty());
        assert_eq!(geocoder.calls(), 1);
        let stop = &resolved[0];
        assert!(stop.is_resolved());
        let expected = great_circle_miles(DEPOT, GeoPoint::new(39.0, -77.4));
        assert_eq!(stop.depot_distance_miles, Some(expected));
    }

    #[test]
    fn test_cache_hit_skips_geocoder() {
        let geocoder = Scripted::new(&[]);
        let mut cached = Stop::new("BD-1", "Alice", "old address text", 5);
        cached.set_location(GeoPoint::new(38.96, -77.38), 1.25);
        let cache: BTreeMap<String, Stop> = [("BD-1".to_string(), cached)].into();

        // Address text changed since the cache entry was written; the
        // cached coordinate is reused anyway (at-most-once policy).
        let stops = vec![Stop::new("BD-1", "Alice", "new address text", 5)];
        let (resolved, unresolved) = resolve_all(stops, &cache, &geocoder, DEPOT);

        assert!(unresolved.is_empty());
        assert_eq!(geocoder.calls(), 0);
        assert_eq!(resolved[0].location, Some(GeoPoint::new(38.96, -77.38)));
        assert_eq!(resolved[0].depot_distance_miles, Some(1.25));
        assert_eq!(resolved[0].address, "new address text");
    }

    #[test]
    fn test_unresolved_cache_entry_is_retried() {
        let geocoder = Scripted::new(&[("1 Main St", GeoPoint::new(39.0, -77.4))]);
        // A cache entry without coordinates does not count as resolved.
        let cache: BTreeMap<String, Stop> =
            [("BD-1".to_string(), Stop::new("BD-1", "Alice", "1 Main St", 5))].into();

        let stops = vec![Stop::new("BD-1", "Alice", "1 Main St", 5)];
        let (resolved, _) = resolve_all(stops, &cache, &geocoder, DEPOT);

        assert_eq!(geocoder.calls(), 1);
        assert!(resolved[0].is_resolved());
    }

    #[test]
    fn test_failures_collected_not_fatal() {
        let geocoder = Scripted::new(&[("good address", GeoPoint::new(39.0, -77.4))]);
        let stops = vec![
            Stop::new("BD-1", "Alice", "good address", 5),
            Stop::new("BD-2", "Bob", "unparseable address", 3),
        ];

        let (resolved, unresolved) = resolve_all(stops, &BTreeMap::new(), &geocoder, DEPOT);

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "BD-1");
        assert_eq!(unresolved, ["BD-2"]);
    }

    #[test]
    fn test_resolve_twice_is_idempotent() {
        let geocoder = Scripted::new(&[("1 Main St", GeoPoint::new(39.0, -77.4))]);
        let stops = vec![Stop::new("BD-1", "Alice", "1 Main St", 5)];

        let (first, _) = resolve_all(stops.clone(), &BTreeMap::new(), &geocoder, DEPOT);
        let cache: BTreeMap<String, Stop> =
            first.iter().map(|s| (s.id.clone(), s.clone())).collect();
        let (second, _) = resolve_all(stops, &cache, &geocoder, DEPOT);

        assert_eq!(first, second);
        assert_eq!(geocoder.calls(), 1);
    }
}
