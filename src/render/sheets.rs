//! Printable per-route run sheets.
//!
//! Each route gets a plain-text sheet a driver can work from: vehicle,
//! contact number, and the stops in delivery order. Sheets are
//! independent of each other, so they render in a rayon fan-out over the
//! read-only route list.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::Result;
use crate::models::{RoutePlan, Stop};

/// Writes `Route-N.txt` for every route and returns the paths in route
/// order.
pub fn write_run_sheets(
    dir: &Path,
    plan: &RoutePlan,
    routes: &[Vec<Stop>],
    contact: &str,
) -> Result<Vec<PathBuf>> {
    routes
        .par_iter()
        .enumerate()
        .map(|(index, route)| {
            let title = format!("Route-{}", index + 1);
            let path = dir.join(format!("{title}.txt"));
            let sheet = render_sheet(&title, plan, index, route, contact);
            fs::write(&path, sheet)?;
            Ok(path)
        })
        .collect()
}

fn render_sheet(
    title: &str,
    plan: &RoutePlan,
    index: usize,
    route: &[Stop],
    contact: &str,
) -> String {
    let bags: u32 = route.iter().map(|s| s.load).sum();
    let vehicle = plan
        .routes()
        .get(index)
        .map(|r| match r.vehicle() {
            Some(label) => label.to_string(),
            None => "NEEDS MANUAL SPLIT".to_string(),
        })
        .unwrap_or_default();

    let mut sheet = String::new();
    let _ = writeln!(sheet, "{title}");
    let _ = writeln!(sheet, "{}", "=".repeat(title.len()));
    let _ = writeln!(sheet, "Vehicle: {vehicle}");
    let _ = writeln!(sheet, "Bags: {bags} across {} stops", route.len());
    let _ = writeln!(sheet, "Questions? Call {contact}");
    let _ = writeln!(sheet);

    for (n, stop) in route.iter().enumerate() {
        let _ = writeln!(
            sheet,
            "{:>2}. [{}] {} - {} ({} bags)",
            n + 1,
            stop.id,
            stop.name,
            stop.address,
            stop.load
        );
        if !stop.comments.is_empty() {
            let _ = writeln!(sheet, "      note: {}", stop.comments);
        }
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::models::Route;
    use tempfile::tempdir;

    fn stop(id: &str, load: u32) -> Stop {
        let mut s = Stop::new(id, format!("{id} name"), format!("{id} street"), load)
            .with_comments(if id == "A" { "gate code 4321" } else { "" });
        s.set_location(GeoPoint::new(38.9, -77.4), 2.0);
        s
    }

    fn plan_for(routes: &[Vec<Stop>]) -> RoutePlan {
        let mut plan = RoutePlan::new();
        for route in routes {
            let mut r = Route::seeded(&route[0].id, route[0].load);
            for s in &route[1..] {
                r.push(&s.id, s.load);
            }
            r.set_vehicle("Box Truck");
            plan.add_route(r);
        }
        plan
    }

    #[test]
    fn test_sheet_per_route() {
        let dir = tempdir().expect("tempdir");
        let routes = vec![vec![stop("A", 8), stop("B", 4)], vec![stop("C", 15)]];
        let plan = plan_for(&routes);

        let paths = write_run_sheets(dir.path(), &plan, &routes, "(555) 010-0000").expect("write");
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("Route-1.txt"));

        let sheet = fs::read_to_string(&paths[0]).expect("read");
        assert!(sheet.contains("Route-1"));
        assert!(sheet.contains("Vehicle: Box Truck"));
        assert!(sheet.contains("Bags: 12 across 2 stops"));
        assert!(sheet.contains("(555) 010-0000"));
        assert!(sheet.contains("[A] A name"));
        assert!(sheet.contains("note: gate code 4321"));
    }

    #[test]
    fn test_overflow_route_labeled_for_manual_split() {
        let dir = tempdir().expect("tempdir");
        let routes = vec![vec![stop("A", 400)]];
        let mut plan = RoutePlan::new();
        let mut r = Route::seeded("A", 400);
        r.mark_overflow();
        plan.add_route(r);

        let paths = write_run_sheets(dir.path(), &plan, &routes, "(555) 010-0000").expect("write");
        let sheet = fs::read_to_string(&paths[0]).expect("read");
        assert!(sheet.contains("NEEDS MANUAL SPLIT"));
    }
}
