//! Error types for the forecast pipeline.
//!
//! None of these are retried at this level; retry policy, if any, belongs to
//! the caller. Cache failures never appear here: reads degrade to a miss and
//! writes are best-effort.

use thiserror::Error;

/// Geocoding failures, each distinct enough for the CLI to render clearly.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Input was not a 5-digit US ZIP code; no request was made.
    #[error("invalid ZIP code format: {0:?}")]
    InvalidZip(String),

    #[error("geocoding API returned status {0}")]
    HttpStatus(u16),

    /// Provider reported a non-OK status with an explicit message.
    #[error("geocoding error: {message} ({status})")]
    Provider { status: String, message: String },

    /// Provider reported a non-OK status with no message.
    #[error("no geocoding results found for ZIP code (status {0})")]
    ProviderStatus(String),

    /// Provider returned OK but the result list was empty.
    #[error("no geocoding results found for ZIP code")]
    NoResults,

    #[error("geocoding request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("parsing geocoding response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pollen API failures.
#[derive(Debug, Error)]
pub enum PollenError {
    /// Day count outside [1,5]; no request was made.
    #[error("days must be between 1 and 5, got {0}")]
    InvalidDays(u8),

    /// Non-2xx response carrying a provider error message.
    #[error("pollen API request failed: {0}")]
    Api(String),

    /// Non-2xx response with no parseable error message.
    #[error("pollen API returned status {0}")]
    HttpStatus(u16),

    #[error("pollen request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("parsing pollen response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pipeline-level wrapper identifying which stage failed.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("geocoding ZIP {zip}: {source}")]
    Geocoding {
        zip: String,
        #[source]
        source: GeocodeError,
    },

    #[error("fetching pollen forecast: {0}")]
    Fetch(#[from] PollenError),
}
