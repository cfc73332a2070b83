//! Error types.

use thiserror::Error;

/// Errors produced while planning delivery routes.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("input column {0:?} not found in CSV header")]
    MissingColumn(String),

    #[error("geocoding failed: {0}")]
    Geocode(String),

    #[error("no geocoding provider configured (set GOOGLE_API_KEY or SMARTY_AUTH_ID/SMARTY_AUTH_TOKEN)")]
    NoProvider,

    #[error("stop {id} is assigned to more than one route")]
    DuplicateAssignment { id: String },

    #[error("stop {id} is missing from the route partition")]
    UnassignedStop { id: String },

    #[error("stop {id} is {miles:.1} miles from the depot (sanity limit {limit:.0} miles); check its geocoded coordinates")]
    DistanceSanity { id: String, miles: f64, limit: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
