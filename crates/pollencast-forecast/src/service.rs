//! Orchestrates the forecast pipeline: cache lookup, geocode, fetch, format,
//! cache store.

use std::time::Duration;

use crate::cache::ForecastCache;
use crate::error::ForecastError;
use crate::format::format_forecast;
use crate::geocode::Geocoder;
use crate::pollen::PollenProvider;
use crate::types::ForecastResult;

/// Single entry point combining cache, geocoding, forecast fetch and
/// formatting. Holds no mutable state; every call is independent except for
/// the shared cache directory.
#[derive(Debug)]
pub struct ForecastService<G, P> {
    geocoder: G,
    pollen: P,
    cache: Option<ForecastCache>,
}

impl<G: Geocoder, P: PollenProvider> ForecastService<G, P> {
    pub fn new(geocoder: G, pollen: P, cache: Option<ForecastCache>) -> Self {
        Self {
            geocoder,
            pollen,
            cache,
        }
    }

    /// Get the formatted forecast for a ZIP code, cache-first.
    ///
    /// A cache hit skips both network calls and comes back annotated with
    /// `cached: true` and its age. A hit that fails to deserialize is treated
    /// as a miss, and a failed cache write is ignored: the cache is never a
    /// reason for this call to fail.
    pub async fn get_forecast(
        &self,
        zip: &str,
        days: u8,
    ) -> Result<ForecastResult, ForecastError> {
        let cache_key = ForecastCache::key(zip, days);

        if let Some(cache) = &self.cache {
            if let Some((mut result, age)) = cache.get::<ForecastResult>(&cache_key) {
                tracing::debug!(zip, days, ?age, "serving forecast from cache");
                result.cached = true;
                result.cache_age = age;
                return Ok(result);
            }
        }

        let location =
            self.geocoder
                .geocode(zip)
                .await
                .map_err(|source| ForecastError::Geocoding {
                    zip: zip.to_string(),
                    source,
                })?;

        let raw = self
            .pollen
            .forecast(location.latitude, location.longitude, days)
            .await?;

        let forecast = format_forecast(Some(&raw));

        let result = ForecastResult {
            location,
            forecast,
            cached: false,
            cache_age: Duration::ZERO,
        };

        if let Some(cache) = &self.cache {
            if let Err(err) = cache.set(&cache_key, &result) {
                tracing::debug!(%err, "cache write failed");
            }
        }

        Ok(result)
    }
}
