//! ZIP code geocoding via the Google Maps Geocoding API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::GeocodeError;
use crate::types::Location;

const GEOCODING_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Resolves a US ZIP code to coordinates and a display name.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, zip: &str) -> Result<Location, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    geometry: Geometry,
    #[serde(default)]
    formatted_address: String,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// [`Geocoder`] backed by the Google Maps Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleGeocoder {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeocodeError> {
        Self::with_base_url(api_key, GEOCODING_URL)
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }
}

fn is_valid_zip(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    /// Convert a US ZIP code to a [`Location`]. Takes the first result.
    async fn geocode(&self, zip: &str) -> Result<Location, GeocodeError> {
        if !is_valid_zip(zip) {
            return Err(GeocodeError::InvalidZip(zip.to_string()));
        }

        tracing::debug!(zip, "geocoding ZIP code");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("address", zip), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let data: GeocodingResponse = serde_json::from_str(&body)?;

        if data.status != "OK" {
            return Err(match data.error_message {
                Some(message) if !message.is_empty() => GeocodeError::Provider {
                    status: data.status,
                    message,
                },
                _ => GeocodeError::ProviderStatus(data.status),
            });
        }

        let first = data
            .results
            .into_iter()
            .next()
            .ok_or(GeocodeError::NoResults)?;

        Ok(Location {
            latitude: first.geometry.location.lat,
            longitude: first.geometry.location.lng,
            display_name: first.formatted_address,
        })
    }
}
