//! End-to-end planning run.
//!
//! Control flow: ingest and validate the CSV, resolve coordinates through
//! the stop cache and geocoder, load or rebuild the adjacency, cluster,
//! validate the partition, persist the routes, render artifacts.

use std::collections::BTreeMap;
use std::path::Path;

use log::{info, warn};

use crate::adjacency::Adjacency;
use crate::cluster::cluster;
use crate::config::Config;
use crate::error::Result;
use crate::geocode::{self, Geocoder};
use crate::ingest::{self, RowIssue};
use crate::models::Stop;
use crate::render;
use crate::store::Store;

/// What a run produced, for the caller's summary output.
#[derive(Debug)]
pub struct RunSummary {
    /// Stops that were routed.
    pub stops: usize,
    /// Total bags across all routes.
    pub bags: u32,
    /// Number of routes produced.
    pub routes: usize,
    /// Routes flagged for manual splitting.
    pub overflow_routes: usize,
    /// Ids excluded because geocoding failed.
    pub unresolved: Vec<String>,
    /// Input rows excluded or flagged during validation.
    pub issues: Vec<RowIssue>,
}

/// Runs the full planning pipeline over one input file.
///
/// Validation and geocoding failures exclude individual stops and are
/// reported on the summary; a broken partition or an insane depot
/// distance aborts before any artifact is written.
pub fn run(config: &Config, input: &Path, geocoder: &dyn Geocoder) -> Result<RunSummary> {
    let (stops, issues) = ingest::read_stops(input, config.columns())?;
    for issue in &issues {
        warn!("{issue}");
    }
    info!("read {} stops from {}", stops.len(), input.display());

    let store = Store::open(config.output_dir())?;
    let cache = store.load_stops()?;
    let (resolved, unresolved) = geocode::resolve_all(stops, &cache, geocoder, config.depot());
    if !unresolved.is_empty() {
        warn!(
            "{} stops could not be geocoded and were excluded: {}",
            unresolved.len(),
            unresolved.join(", ")
        );
    }

    let by_id: BTreeMap<String, Stop> = resolved
        .iter()
        .map(|s| (s.id.clone(), s.clone()))
        .collect();
    store.save_stops(&by_id)?;

    let adjacency = match store.load_adjacency()? {
        Some(adjacency) if adjacency.is_fresh_for(by_id.len()) => {
            info!("reusing persisted adjacency ({} stops)", adjacency.len());
            adjacency
        }
        _ => {
            info!("computing adjacency for {} stops", by_id.len());
            let adjacency = Adjacency::build(&resolved);
            store.save_adjacency(&adjacency)?;
            adjacency
        }
    };

    let fleet = config.fleet()?;
    let mut plan = cluster(&by_id, &adjacency, &fleet);
    for id in &unresolved {
        plan.add_unresolved(id);
    }

    let expected = by_id.keys().cloned().collect();
    plan.validate_partition(&expected)?;

    let expanded: Vec<Vec<Stop>> = plan
        .routes()
        .iter()
        .map(|route| {
            route
                .stop_ids()
                .iter()
                .map(|id| by_id[id].clone())
                .collect()
        })
        .collect();
    store.save_routes(&expanded)?;

    render::render_all(config.output_dir(), &plan, &expanded, config.contact())?;

    Ok(RunSummary {
        stops: plan.num_stops(),
        bags: plan.total_load(),
        routes: plan.num_routes(),
        overflow_routes: plan.num_overflow(),
        unresolved,
        issues,
    })
}
