//! Google Maps Geocoding API adapter.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

use super::Geocoder;

const ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Thin blocking client for the Google Maps Geocoding API.
pub struct GoogleGeocoder {
    client: Client,
    api_key: String,
}

impl GoogleGeocoder {
    /// Creates a geocoder using the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key: api_key.into(),
        })
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<GeoPoint> {
        let response: GeocodeResponse = self
            .client
            .get(ENDPOINT)
            .query(&[("address", address), ("key", &self.api_key)])
            .send()?
            .error_for_status()?
            .json()?;

        if response.status != "OK" {
            return Err(Error::Geocode(format!(
                "Google returned status {} for {address:?}",
                response.status
            )));
        }
        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::Geocode(format!("Google returned no results for {address:?}")))?;

        let point = GeoPoint::new(result.geometry.location.lat, result.geometry.location.lng);
        if !point.is_valid() {
            return Err(Error::Geocode(format!(
                "Google returned an out-of-range coordinate for {address:?}"
            )));
        }
        Ok(point)
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}
