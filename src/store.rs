//! Whole-file JSON caches for stops, adjacencies, and finished routes.
//!
//! All three files are human-inspectable, rewritten in full on save, and
//! safe to delete to force recomputation. There are no transactional
//! guarantees; last write wins.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::adjacency::Adjacency;
use crate::error::Result;
use crate::models::Stop;

const STOPS_FILE: &str = "stops.json";
const ADJACENCIES_FILE: &str = "adjacencies.json";
const ROUTES_FILE: &str = "routes.json";

/// On-disk cache directory holding the three JSON files.
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Opens (creating if needed) the cache directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Loads previously resolved stops keyed by id; empty when no cache
    /// file exists yet.
    pub fn load_stops(&self) -> Result<BTreeMap<String, Stop>> {
        let path = self.dir.join(STOPS_FILE);
        let stops: BTreeMap<String, Stop> = read_json_or(&path, BTreeMap::new)?;
        info!("loaded {} cached stops from {}", stops.len(), path.display());
        Ok(stops)
    }

    /// Rewrites the stop cache with this run's resolved stops.
    pub fn save_stops(&self, stops: &BTreeMap<String, Stop>) -> Result<()> {
        let path = self.dir.join(STOPS_FILE);
        write_json(&path, stops)?;
        info!("saved {} stops to {}", stops.len(), path.display());
        Ok(())
    }

    /// Loads the persisted adjacency, if one exists.
    pub fn load_adjacency(&self) -> Result<Option<Adjacency>> {
        let path = self.dir.join(ADJACENCIES_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let adjacency: Adjacency = read_json(&path)?;
        info!(
            "loaded {} adjacency lists from {}",
            adjacency.len(),
            path.display()
        );
        Ok(Some(adjacency))
    }

    /// Rewrites the persisted adjacency.
    pub fn save_adjacency(&self, adjacency: &Adjacency) -> Result<()> {
        let path = self.dir.join(ADJACENCIES_FILE);
        write_json(&path, adjacency)?;
        info!(
            "saved {} adjacency lists to {}",
            adjacency.len(),
            path.display()
        );
        Ok(())
    }

    /// Loads the finished route partition: ordered routes of full delivery
    /// records, the contract consumed by rendering.
    pub fn load_routes(&self) -> Result<Option<Vec<Vec<Stop>>>> {
        let path = self.dir.join(ROUTES_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let routes: Vec<Vec<Stop>> = read_json(&path)?;
        info!("loaded {} routes from {}", routes.len(), path.display());
        Ok(Some(routes))
    }

    /// Rewrites the finished route partition.
    pub fn save_routes(&self, routes: &[Vec<Stop>]) -> Result<()> {
        let path = self.dir.join(ROUTES_FILE);
        write_json(&path, &routes)?;
        info!("saved {} routes to {}", routes.len(), path.display());
        Ok(())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn read_json_or<T: DeserializeOwned>(path: &Path, default: impl FnOnce() -> T) -> Result<T> {
    if path.exists() {
        read_json(path)
    } else {
        Ok(default())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
