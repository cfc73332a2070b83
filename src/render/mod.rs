//! Rendering of route artifacts for drivers and dispatchers.
//!
//! Consumes the finished, immutable route partition and produces the
//! master CSV, the per-route summary CSV, a KML map, and per-route run
//! sheets. Rendering shares no mutable state with the clustering core.

mod kml;
mod sheets;
mod tables;

pub use kml::write_kml;
pub use sheets::write_run_sheets;
pub use tables::{write_master_csv, write_route_summary_csv};

use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::models::{RoutePlan, Stop};

/// A stop farther than this from the depot signals a geocoding error
/// upstream (wrong coordinate resolved) and is fatal at render time.
pub const MAX_DEPOT_DISTANCE_MILES: f64 = 100.0;

/// Pre-render sanity checks over the expanded routes.
///
/// Fails on a stop id appearing in more than one route (a clustering or
/// persistence bug) and on any depot distance past
/// [`MAX_DEPOT_DISTANCE_MILES`]. Both stop the run before any artifact
/// is produced.
pub fn check_renderable(routes: &[Vec<Stop>]) -> Result<()> {
    let mut seen = std::collections::BTreeSet::new();
    for route in routes {
        for stop in route {
            if !seen.insert(stop.id.clone()) {
                return Err(Error::DuplicateAssignment {
                    id: stop.id.clone(),
                });
            }
            if let Some(miles) = stop.depot_distance_miles {
                if miles > MAX_DEPOT_DISTANCE_MILES {
                    return Err(Error::DistanceSanity {
                        id: stop.id.clone(),
                        miles,
                        limit: MAX_DEPOT_DISTANCE_MILES,
                    });
                }
            }
        }
    }
    Ok(())
}

/// Renders every artifact into `dir` after the sanity checks pass.
pub fn render_all(dir: &Path, plan: &RoutePlan, routes: &[Vec<Stop>], contact: &str) -> Result<()> {
    check_renderable(routes)?;
    let master = write_master_csv(dir, routes)?;
    info!("wrote {}", master.display());
    let summary = write_route_summary_csv(dir, routes)?;
    info!("wrote {}", summary.display());
    let kml = write_kml(dir, routes)?;
    info!("wrote {}", kml.display());
    let sheets = write_run_sheets(dir, plan, routes, contact)?;
    info!("wrote {} run sheets", sheets.len());
    Ok(())
}
