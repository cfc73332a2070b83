//! CSV artifacts: the master stop list and the per-route summary.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Stop;

/// Route display label, 1-based.
fn route_label(index: usize) -> String {
    format!("route-{}", index + 1)
}

/// Writes `master.csv`: one row per stop with its route label, in route
/// order. This is the sheet dispatch reads top to bottom on the day.
pub fn write_master_csv(dir: &Path, routes: &[Vec<Stop>]) -> Result<PathBuf> {
    let path = dir.join("master.csv");
    let mut writer = csv::Writer::from_path(&path)?;

    writer.write_record(["ID", "Name", "Address", "Bags", "Route", "Comments"])?;
    for (index, route) in routes.iter().enumerate() {
        for stop in route {
            writer.write_record([
                stop.id.as_str(),
                stop.name.as_str(),
                stop.address.as_str(),
                &stop.load.to_string(),
                &route_label(index),
                stop.comments.as_str(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(path)
}

/// Writes `routes.csv`: one row per route with totals and blank columns
/// for the driver to fill in by hand.
pub fn write_route_summary_csv(dir: &Path, routes: &[Vec<Stop>]) -> Result<PathBuf> {
    let path = dir.join("routes.csv");
    let mut writer = csv::Writer::from_path(&path)?;

    writer.write_record([
        "Route", "Bag Count", "Deliveries", "Stops", "Driver", "Time Out", "Time In", "Duration",
    ])?;
    for (index, route) in routes.iter().enumerate() {
        let bags: u32 = route.iter().map(|s| s.load).sum();
        let ids: Vec<&str> = route.iter().map(|s| s.id.as_str()).collect();
        writer.write_record([
            route_label(index).as_str(),
            &bags.to_string(),
            &ids.join(";"),
            &route.len().to_string(),
            "",
            "",
            "",
            "",
        ])?;
    }
    writer.flush()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use tempfile::tempdir;

    fn stop(id: &str, load: u32) -> Stop {
        let mut s = Stop::new(id, format!("{id} name"), format!("{id} street, Town, VA 20170"), load)
            .with_comments("ring bell");
        s.set_location(GeoPoint::new(38.9, -77.4), 2.0);
        s
    }

    fn sample_routes() -> Vec<Vec<Stop>> {
        vec![vec![stop("A", 8), stop("B", 4)], vec![stop("C", 15)]]
    }

    #[test]
    fn test_master_csv_rows() {
        let dir = tempdir().expect("tempdir");
        let path = write_master_csv(dir.path(), &sample_routes()).expect("write");

        let mut reader = csv::Reader::from_path(path).expect("read");
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "A");
        assert_eq!(&rows[0][4], "route-1");
        assert_eq!(&rows[2][0], "C");
        assert_eq!(&rows[2][4], "route-2");
        assert_eq!(&rows[0][5], "ring bell");
    }

    #[test]
    fn test_route_summary_totals() {
        let dir = tempdir().expect("tempdir");
        let path = write_route_summary_csv(dir.path(), &sample_routes()).expect("write");

        let mut reader = csv::Reader::from_path(path).expect("read");
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.expect("row")).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "route-1");
        assert_eq!(&rows[0][1], "12");
        assert_eq!(&rows[0][2], "A;B");
        assert_eq!(&rows[0][3], "2");
        assert_eq!(&rows[1][1], "15");
    }

    #[test]
    fn test_empty_routes() {
        let dir = tempdir().expect("tempdir");
        let path = write_master_csv(dir.path(), &[]).expect("write");
        let mut reader = csv::Reader::from_path(path).expect("read");
        assert_eq!(reader.records().count(), 0);
    }
}
