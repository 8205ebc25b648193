//! Pollen forecast pipeline for Pollencast.
//!
//! Orchestrates cache lookup, ZIP geocoding, pollen fetch and formatting
//! behind a single [`ForecastService`] entry point. The Google-backed clients
//! sit behind narrow traits so the service can be tested without network
//! access.

pub mod cache;
pub mod error;
pub mod format;
pub mod geocode;
pub mod pollen;
pub mod service;
pub mod types;

pub use cache::ForecastCache;
pub use error::{ForecastError, GeocodeError, PollenError};
pub use format::format_forecast;
pub use geocode::{Geocoder, GoogleGeocoder};
pub use pollen::{GooglePollenClient, PollenProvider};
pub use service::ForecastService;
pub use types::*;
