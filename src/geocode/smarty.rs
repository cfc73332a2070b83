//! SmartyStreets US Street Address API adapter.

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

use super::Geocoder;

const ENDPOINT: &str = "https://us-street.api.smarty.com/street-address";

/// Thin blocking client for the SmartyStreets street-address API.
pub struct SmartyGeocoder {
    client: Client,
    auth_id: String,
    auth_token: String,
}

impl SmartyGeocoder {
    /// Creates a geocoder using the given credential pair.
    pub fn new(auth_id: impl Into<String>, auth_token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            auth_id: auth_id.into(),
            auth_token: auth_token.into(),
        })
    }
}

impl Geocoder for SmartyGeocoder {
    fn geocode(&self, address: &str) -> Result<GeoPoint> {
        let candidates: Vec<Candidate> = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("auth-id", self.auth_id.as_str()),
                ("auth-token", self.auth_token.as_str()),
                ("street", address),
                ("candidates", "1"),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        let candidate = candidates.into_iter().next().ok_or_else(|| {
            Error::Geocode(format!("SmartyStreets returned no candidates for {address:?}"))
        })?;

        candidate_point(candidate, address)
    }
}

fn candidate_point(candidate: Candidate, address: &str) -> Result<GeoPoint> {
    let (latitude, longitude) = match (candidate.metadata.latitude, candidate.metadata.longitude) {
        (Some(latitude), Some(longitude)) => (latitude, longitude),
        _ => {
            return Err(Error::Geocode(format!(
                "SmartyStreets candidate has no coordinates for {address:?}"
            )))
        }
    };

    let point = GeoPoint::new(latitude, longitude);
    if !point.is_valid() {
        return Err(Error::Geocode(format!(
            "SmartyStreets returned an out-of-range coordinate for {address:?}"
        )));
    }
    Ok(point)
}

#[derive(Debug, Deserialize)]
struct Candidate {
    metadata: Metadata,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    // Absent for addresses Smarty matches but cannot place.
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_parsing() {
        let body = r#"[
            {"metadata": {"latitude": 38.9586, "longitude": -77.3570, "precision": "Zip9"}}
        ]"#;
        let candidates: Vec<Candidate> = serde_json::from_str(body).expect("parse");
        assert_eq!(candidates[0].metadata.latitude, Some(38.9586));
        assert_eq!(candidates[0].metadata.longitude, Some(-77.3570));
    }

    #[test]
    fn test_empty_candidates() {
        let candidates: Vec<Candidate> = serde_json::from_str("[]").expect("parse");
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_candidate_without_coordinates_is_an_error() {
        // Smarty can match an address without placing it; the candidate
        // then carries no latitude/longitude. That must fail here, not
        // flow downstream as (0.0, 0.0).
        let body = r#"[{"metadata": {"precision": "Unknown"}}]"#;
        let candidates: Vec<Candidate> = serde_json::from_str(body).expect("parse");
        let candidate = candidates.into_iter().next().expect("one candidate");
        assert!(candidate.metadata.latitude.is_none());

        let err = candidate_point(candidate, "1 Main St").unwrap_err();
        assert!(matches!(err, Error::Geocode(msg) if msg.contains("no coordinates")));
    }

    #[test]
    fn test_candidate_point_ok() {
        let body = r#"[{"metadata": {"latitude": 38.9586, "longitude": -77.3570}}]"#;
        let candidates: Vec<Candidate> = serde_json::from_str(body).expect("parse");
        let point =
            candidate_point(candidates.into_iter().next().expect("one"), "1 Main St")
                .expect("point");
        assert_eq!(point, GeoPoint::new(38.9586, -77.3570));
    }
}
