//! Raw pollen forecast fetch via the Google Pollen API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::PollenError;
use crate::types::RawForecast;

const POLLEN_URL: &str = "https://pollen.googleapis.com/v1/forecast:lookup";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Smallest and largest day counts the provider accepts.
pub const MIN_FORECAST_DAYS: u8 = 1;
pub const MAX_FORECAST_DAYS: u8 = 5;

/// Fetches the raw multi-day pollen forecast for a coordinate pair.
#[async_trait]
pub trait PollenProvider: Send + Sync {
    async fn forecast(&self, lat: f64, lng: f64, days: u8) -> Result<RawForecast, PollenError>;
}

/// Error envelope returned by the API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// [`PollenProvider`] backed by the Google Pollen API.
#[derive(Debug, Clone)]
pub struct GooglePollenClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GooglePollenClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, PollenError> {
        Self::with_base_url(api_key, POLLEN_URL)
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, PollenError> {
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

#[async_trait]
impl PollenProvider for GooglePollenClient {
    async fn forecast(&self, lat: f64, lng: f64, days: u8) -> Result<RawForecast, PollenError> {
        if !(MIN_FORECAST_DAYS..=MAX_FORECAST_DAYS).contains(&days) {
            return Err(PollenError::InvalidDays(days));
        }

        tracing::debug!(lat, lng, days, "fetching pollen forecast");

        let query = [
            ("key", self.api_key.clone()),
            ("location.latitude", lat.to_string()),
            ("location.longitude", lng.to_string()),
            ("days", days.to_string()),
            ("languageCode", "en".to_string()),
        ];

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
                if !envelope.error.message.is_empty() {
                    return Err(PollenError::Api(envelope.error.message));
                }
            }
            return Err(PollenError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
