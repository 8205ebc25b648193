use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Geocoded location for a ZIP code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

// --- Raw API response types (mirror the Google Pollen API JSON) ---

/// Top-level response from the Google Pollen API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForecast {
    #[serde(default)]
    pub daily_info: Vec<DailyInfo>,
    #[serde(default)]
    pub region_code: String,
}

/// Pollen data for a single day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyInfo {
    #[serde(default)]
    pub date: DateInfo,
    #[serde(default)]
    pub pollen_type_info: Vec<PollenTypeInfo>,
}

/// A plain calendar date from the API; no timezone attached.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateInfo {
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub month: u32,
    #[serde(default)]
    pub day: u32,
}

/// Data for one pollen type (GRASS, TREE, WEED).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollenTypeInfo {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub health_recommendations: Vec<String>,
    #[serde(default)]
    pub in_season: bool,
    /// Absent when the provider has no index data for this type/day.
    #[serde(default)]
    pub index_info: Option<IndexInfo>,
}

/// Universal Pollen Index data (0-5 scale).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub value: u8,
    /// "None", "Very Low", "Low", "Moderate", "High", "Very High".
    #[serde(default)]
    pub category: String,
}

// --- Formatted output types (used by the CLI and cached as-is) ---

/// Formatted pollen level for one type on one day.
///
/// `level: None` together with `category: "No Data"` means the provider
/// returned no index for that type; distinct from a real level of 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollenLevel {
    pub level: Option<u8>,
    pub category: String,
    pub in_season: bool,
}

/// Formatted forecast for a single day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    /// Zero-padded "YYYY-MM-DD".
    pub date: String,
    /// "Today", "Tomorrow", or a weekday name.
    pub day_name: String,
    pub grass: PollenLevel,
    pub tree: PollenLevel,
    pub weed: PollenLevel,
    /// Up to 3 unique recommendations, first-seen order across pollen types.
    pub health_recommendations: Vec<String>,
}

/// Fully formatted forecast, oldest day first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    pub region_code: String,
    pub days: Vec<DayForecast>,
}

/// What the service returns: location, forecast and cache provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub location: Location,
    pub forecast: Forecast,
    #[serde(default)]
    pub cached: bool,
    /// How long ago the cached copy was stored; zero for fresh results.
    #[serde(skip)]
    pub cache_age: Duration,
}
