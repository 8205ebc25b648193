//! Terminal rendering for forecast results.
//!
//! ANSI styling is applied only when the stream is a terminal, so piped
//! output stays plain.

use std::io::IsTerminal;

use pollencast_forecast::{DayForecast, ForecastResult, PollenLevel};

const BOLD: &str = "1";
const DIM: &str = "2";
const RED: &str = "31";
const RED_BOLD: &str = "1;31";
const GREEN: &str = "32";
const YELLOW: &str = "33";
const YELLOW_BOLD: &str = "1;33";

fn paint(text: &str, code: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

fn category_color(category: &str) -> &'static str {
    match category {
        "Very Low" | "Low" => GREEN,
        "Moderate" => YELLOW,
        "High" | "Very High" => RED,
        _ => DIM, // "None", "No Data", anything unexpected
    }
}

/// Print the full forecast table to stdout.
pub fn render_forecast(result: &ForecastResult) {
    let color = std::io::stdout().is_terminal();

    println!("{}", paint("Pollencast - Pollen Forecast", BOLD, color));

    let mut location_line = result.location.display_name.clone();
    if result.cached {
        let minutes = result.cache_age.as_secs() / 60;
        location_line.push_str(&paint(&format!(" (cached {minutes}m ago)"), DIM, color));
    }
    println!("{location_line}");
    println!();

    if result.forecast.days.is_empty() {
        println!("No forecast data available.");
        return;
    }

    let today = &result.forecast.days[0];
    if let Some(summary) = summary_line(today, color) {
        println!("{summary}");
        println!();
    }

    let headers = ["Day", "Grass", "Tree", "Weed"];
    let mut has_in_season = false;
    let mut rows = Vec::with_capacity(result.forecast.days.len());
    for day in &result.forecast.days {
        let (grass, g) = cell_text(&day.grass);
        let (tree, t) = cell_text(&day.tree);
        let (weed, w) = cell_text(&day.weed);
        has_in_season |= g || t || w;
        rows.push([day.day_name.clone(), grass, tree, weed]);
    }

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let header_line = headers
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i]))
        .collect::<Vec<_>>()
        .join("  ");
    println!("{}", paint(&header_line, BOLD, color));
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ")
    );

    for (row, day) in rows.iter().zip(&result.forecast.days) {
        let line = [
            pad(&row[0], widths[0]),
            paint(&pad(&row[1], widths[1]), category_color(&day.grass.category), color),
            paint(&pad(&row[2], widths[2]), category_color(&day.tree.category), color),
            paint(&pad(&row[3], widths[3]), category_color(&day.weed.category), color),
        ]
        .join("  ");
        println!("{line}");
    }

    if has_in_season {
        println!("{}", paint("* = in season", DIM, color));
    }

    if !today.health_recommendations.is_empty() {
        println!();
        println!("{}", paint("Health Recommendations", BOLD, color));
        for rec in &today.health_recommendations {
            println!("{}", paint(&format!("  • {rec}"), DIM, color));
        }
    }

    println!();
}

/// Print a one-line summary of today's levels.
pub fn render_compact(result: &ForecastResult) {
    if result.forecast.days.is_empty() {
        println!("No forecast data available.");
        return;
    }

    let today = &result.forecast.days[0];
    let parts = [
        format!("Grass {}", compact_level(&today.grass)),
        format!("Tree {}", compact_level(&today.tree)),
        format!("Weed {}", compact_level(&today.weed)),
    ]
    .join(" | ");

    println!("{}: {parts}", result.location.display_name);
}

/// Print a styled error message to stderr.
pub fn render_error(err: &anyhow::Error) {
    let color = std::io::stderr().is_terminal();
    eprintln!("{}", paint(&format!("Error: {err}"), RED_BOLD, color));
}

/// Actionable one-liner for today: warn on any level of 4 or more, note the
/// all-clear when every reported level is 2 or less.
fn summary_line(day: &DayForecast, color: bool) -> Option<String> {
    let entries = [
        ("Grass", &day.grass),
        ("Tree", &day.tree),
        ("Weed", &day.weed),
    ];

    // Later types replace the pick on equal levels, so ties go to the
    // last one reported.
    let mut worst: Option<(&str, &PollenLevel, u8)> = None;
    for (name, level) in entries {
        if let Some(value) = level.level {
            if value >= 4 && worst.map_or(true, |(_, _, w)| value >= w) {
                worst = Some((name, level, value));
            }
        }
    }

    if let Some((name, level, _)) = worst {
        return Some(paint(
            &format!(
                "⚠ {name} pollen is {} today - consider limiting outdoor activity",
                level.category.to_uppercase()
            ),
            YELLOW_BOLD,
            color,
        ));
    }

    let all_low = entries
        .iter()
        .all(|(_, level)| level.level.map_or(true, |v| v <= 2));
    if all_low {
        return Some(paint("✓ All pollen levels are low today", GREEN, color));
    }

    None
}

fn cell_text(level: &PollenLevel) -> (String, bool) {
    match level.level {
        None => ("- No Data".to_string(), false),
        Some(value) => {
            let marker = if level.in_season { " *" } else { "" };
            (
                format!("■ {value} {}{marker}", abbreviate(&level.category)),
                level.in_season,
            )
        }
    }
}

/// Shorten category names so table columns stay narrow.
fn abbreviate(category: &str) -> &str {
    match category {
        "Very Low" => "V.Low",
        "Moderate" => "Mod",
        "Very High" => "V.High",
        other => other,
    }
}

fn compact_level(level: &PollenLevel) -> String {
    match level.level {
        None => "N/A".to_string(),
        Some(value) if value >= 4 => level.category.to_uppercase(),
        Some(_) => level.category.clone(),
    }
}

fn pad(text: &str, width: usize) -> String {
    let visible = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(visible)))
}
