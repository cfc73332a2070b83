//! # bagroute
//!
//! Delivery route planning for a volunteer food-distribution operation:
//! ingests an address list with bag counts, geocodes each address through
//! an at-most-once cache, clusters stops into vehicle-sized routes, and
//! renders route artifacts (CSV, KML map, printable run sheets).
//!
//! ## Modules
//!
//! - [`models`] - Domain types (Stop, VehicleType/Fleet, Route, RoutePlan)
//! - [`geo`] - Coordinates and great-circle distance
//! - [`adjacency`] - Per-stop neighbor lists sorted by distance
//! - [`cluster`] - Greedy capacity-constrained clustering engine
//! - [`geocode`] - Geocoder trait, providers, cache-first resolution
//! - [`ingest`] - CSV input with column mapping and validation
//! - [`store`] - Whole-file JSON caches (stops, adjacencies, routes)
//! - [`render`] - CSV, KML, and run-sheet artifacts
//! - [`pipeline`] - End-to-end run orchestration
//! - [`config`] - Immutable run configuration

pub mod adjacency;
pub mod cluster;
pub mod config;
pub mod error;
pub mod geo;
pub mod geocode;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod store;

pub use error::{Error, Result};
