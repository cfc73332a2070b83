//! Run configuration.
//!
//! One immutable [`Config`] is constructed at process start, from an
//! optional JSON file plus environment-variable overrides for secrets,
//! and passed by reference into each component. There is no ambient
//! global configuration.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geo::GeoPoint;
use crate::ingest::ColumnMap;
use crate::models::{Fleet, VehicleType};

/// Immutable configuration for a planning run.
///
/// Every field has a default, so a bare `Config::default()` plus a
/// `GOOGLE_API_KEY` environment variable is a working setup. The JSON
/// file uses the same field names:
///
/// ```json
/// {
///   "origin": [38.950633, -77.397684],
///   "trucks": [
///     {"type": "Box Truck", "capacity": 135},
///     {"type": "26' Flatbed", "capacity": 315}
///   ],
///   "output_dir": "output",
///   "columns": {"id": "Name", "load": "Lineitem quantity"}
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Depot coordinate as `[latitude, longitude]`; the routing origin.
    origin: [f64; 2],
    /// Vehicle table, ascending by capacity.
    trucks: Vec<VehicleType>,
    /// Directory for caches and rendered artifacts.
    output_dir: PathBuf,
    /// Contact line printed on run sheets.
    contact: String,
    /// Logical-to-source CSV column mapping.
    columns: ColumnMap,
    google_api_key: Option<String>,
    smarty_auth_id: Option<String>,
    smarty_auth_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: [38.950633, -77.397684],
            trucks: vec![
                VehicleType::new("Box Truck", 135),
                VehicleType::new("26' Flatbed", 315),
            ],
            output_dir: PathBuf::from("output"),
            contact: "(123) 456-7890 (John Smith)".to_string(),
            columns: ColumnMap::default(),
            google_api_key: None,
            smarty_auth_id: None,
            smarty_auth_token: None,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file, then applies environment
    /// overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut config: Config = serde_json::from_reader(BufReader::new(file))?;
        config.apply_env();
        Ok(config)
    }

    /// Builds the default configuration with environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Secrets and the contact line come from the environment when set,
    /// so credentials stay out of checked-in configuration files.
    fn apply_env(&mut self) {
        if let Ok(key) = env::var("GOOGLE_API_KEY") {
            self.google_api_key = Some(key);
        }
        if let Ok(id) = env::var("SMARTY_AUTH_ID") {
            self.smarty_auth_id = Some(id);
        }
        if let Ok(token) = env::var("SMARTY_AUTH_TOKEN") {
            self.smarty_auth_token = Some(token);
        }
        if let Ok(contact) = env::var("CONTACT") {
            self.contact = contact;
        }
    }

    /// The depot coordinate.
    pub fn depot(&self) -> GeoPoint {
        GeoPoint::new(self.origin[0], self.origin[1])
    }

    /// Validates and returns the vehicle fleet.
    pub fn fleet(&self) -> Result<Fleet> {
        Fleet::new(self.trucks.clone())
    }

    /// Cache and artifact directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Overrides the output directory (CLI flag).
    pub fn set_output_dir(&mut self, dir: impl Into<PathBuf>) {
        self.output_dir = dir.into();
    }

    /// Contact line for run sheets.
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// CSV column mapping.
    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Google API key, if configured.
    pub fn google_api_key(&self) -> Option<&str> {
        self.google_api_key.as_deref()
    }

    /// SmartyStreets auth id, if configured.
    pub fn smarty_auth_id(&self) -> Option<&str> {
        self.smarty_auth_id.as_deref()
    }

    /// SmartyStreets auth token, if configured.
    pub fn smarty_auth_token(&self) -> Option<&str> {
        self.smarty_auth_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.depot(), GeoPoint::new(38.950633, -77.397684));
        assert_eq!(config.output_dir(), Path::new("output"));
        let fleet = config.fleet().expect("default fleet is valid");
        assert_eq!(fleet.smallest().capacity, 135);
        assert!(config.google_api_key().is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"origin": [40.0, -75.0], "google_api_key": "k"}"#;
        let config: Config = serde_json::from_str(json).expect("parse");
        assert_eq!(config.depot(), GeoPoint::new(40.0, -75.0));
        assert_eq!(config.google_api_key(), Some("k"));
        // Unspecified fields fall back to defaults.
        assert_eq!(config.fleet().expect("valid").len(), 2);
        assert_eq!(config.columns(), &ColumnMap::default());
    }

    #[test]
    fn test_column_remap_from_json() {
        let json = r#"{"columns": {"id": "Name", "load": "Lineitem quantity"}}"#;
        let config: Config = serde_json::from_str(json).expect("parse");
        assert_eq!(config.columns().id, "Name");
        assert_eq!(config.columns().load, "Lineitem quantity");
        // Unmapped columns keep their defaults.
        assert_eq!(config.columns().street, "Address");
    }

    #[test]
    fn test_invalid_fleet_surfaces_on_use() {
        let json = r#"{"trucks": [{"type": "Big", "capacity": 315}, {"type": "Small", "capacity": 135}]}"#;
        let config: Config = serde_json::from_str(json).expect("parse");
        assert!(config.fleet().is_err());
    }
}
