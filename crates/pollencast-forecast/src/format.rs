//! Pure transformation from the raw provider response to the display shape.
//!
//! No I/O and no clock access beyond the dates already in the data, so the
//! same input always formats to the same output.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::types::{DateInfo, DayForecast, Forecast, PollenLevel, PollenTypeInfo, RawForecast};

const NO_DATA: &str = "No Data";
const UNKNOWN_REGION: &str = "Unknown";
const MAX_RECOMMENDATIONS: usize = 3;

/// Transform a raw API response into a display-ready [`Forecast`].
///
/// `None` input (no data at all) yields an empty forecast for an unknown
/// region rather than an error.
pub fn format_forecast(raw: Option<&RawForecast>) -> Forecast {
    let Some(raw) = raw else {
        return Forecast {
            region_code: UNKNOWN_REGION.to_string(),
            days: Vec::new(),
        };
    };

    let region_code = if raw.region_code.is_empty() {
        UNKNOWN_REGION.to_string()
    } else {
        raw.region_code.clone()
    };

    let days = raw
        .daily_info
        .iter()
        .enumerate()
        .map(|(index, day)| DayForecast {
            date: format!(
                "{:04}-{:02}-{:02}",
                day.date.year, day.date.month, day.date.day
            ),
            day_name: day_name(index, day.date),
            grass: pollen_level(&day.pollen_type_info, "GRASS"),
            tree: pollen_level(&day.pollen_type_info, "TREE"),
            weed: pollen_level(&day.pollen_type_info, "WEED"),
            health_recommendations: health_recommendations(&day.pollen_type_info),
        })
        .collect();

    Forecast { region_code, days }
}

/// "Today", "Tomorrow", or the weekday of the plain calendar date.
///
/// Day 2 onward uses the date itself, treated as a timezone-free calendar
/// day, so the name never drifts with the local clock.
fn day_name(index: usize, date: DateInfo) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => NaiveDate::from_ymd_opt(date.year, date.month, date.day)
            .map(|d| d.format("%A").to_string())
            .unwrap_or_default(),
    }
}

/// Find the entry for `code` and fold it into a [`PollenLevel`].
///
/// A missing entry and an entry without index data both read as "No Data",
/// but only the latter keeps its `in_season` flag.
fn pollen_level(types: &[PollenTypeInfo], code: &str) -> PollenLevel {
    let Some(entry) = types.iter().find(|p| p.code == code) else {
        return PollenLevel {
            level: None,
            category: NO_DATA.to_string(),
            in_season: false,
        };
    };

    match &entry.index_info {
        Some(index) => PollenLevel {
            level: Some(index.value),
            category: index.category.clone(),
            in_season: entry.in_season,
        },
        None => PollenLevel {
            level: None,
            category: NO_DATA.to_string(),
            in_season: entry.in_season,
        },
    }
}

/// Collect unique recommendations across pollen types, provider order,
/// capped at [`MAX_RECOMMENDATIONS`].
fn health_recommendations(types: &[PollenTypeInfo]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut recommendations = Vec::new();

    for entry in types {
        for rec in &entry.health_recommendations {
            if seen.insert(rec.as_str()) {
                recommendations.push(rec.clone());
                if recommendations.len() == MAX_RECOMMENDATIONS {
                    return recommendations;
                }
            }
        }
    }

    recommendations
}
