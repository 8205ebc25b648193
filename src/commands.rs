//! Command handlers: forecast lookup, config management, first-run setup.

use anyhow::{bail, Result};
use std::io::Write;
use std::time::Duration;

use pollencast_core::{config::API_KEY_ENV, Config};
use pollencast_forecast::{
    ForecastCache, ForecastError, ForecastService, GeocodeError, GooglePollenClient,
    GoogleGeocoder, PollenError,
};

use crate::{ui, ConfigCommand, ForecastOpts};

/// Deadline covering the whole cache/geocode/fetch pipeline.
const PIPELINE_TIMEOUT: Duration = Duration::from_secs(15);

/// Run the forecast pipeline and render the result.
pub async fn forecast(opts: ForecastOpts) -> Result<()> {
    let mut cfg = Config::load()?;

    // First run: no config file exists yet.
    if !Config::exists() {
        cfg = first_time_setup()?;
    }

    if let Err(err) = cfg.validate() {
        bail!(
            "{err}\nRun: pollencast config set api_key YOUR_KEY\nOr set the {API_KEY_ENV} environment variable"
        );
    }

    // ZIP resolution: argument beats config default.
    let zip = match opts.zip.filter(|z| !z.is_empty()) {
        Some(zip) => zip,
        None if !cfg.default_zip.is_empty() => cfg.default_zip.clone(),
        None => bail!(
            "no ZIP code provided\nUsage: pollencast [ZIP]\nOr set a default: pollencast config set default_zip 94025"
        ),
    };

    // Days resolution: --today > --days > config.
    let days = if opts.today {
        1
    } else {
        opts.days.unwrap_or(cfg.days)
    };

    tracing::debug!(%zip, days, "running forecast command");

    let geocoder = GoogleGeocoder::new(&cfg.api_key)
        .map_err(|e| anyhow::anyhow!("creating geocoding client: {e}"))?;
    let pollen = GooglePollenClient::new(&cfg.api_key)
        .map_err(|e| anyhow::anyhow!("creating pollen client: {e}"))?;
    let cache = ForecastCache::new(ForecastCache::default_dir());
    let service = ForecastService::new(geocoder, pollen, Some(cache));

    let outcome = tokio::time::timeout(PIPELINE_TIMEOUT, service.get_forecast(&zip, days)).await;

    let result = match outcome {
        Err(_) => bail!(
            "request timed out after {}s",
            PIPELINE_TIMEOUT.as_secs()
        ),
        Ok(Err(ForecastError::Geocoding {
            source: GeocodeError::InvalidZip(z),
            ..
        })) => bail!("invalid ZIP code {z:?} - please enter a 5-digit US ZIP code"),
        Ok(Err(ForecastError::Fetch(PollenError::InvalidDays(_)))) => {
            bail!("days must be between 1 and 5")
        }
        Ok(Err(err)) => return Err(err.into()),
        Ok(Ok(result)) => result,
    };

    if opts.compact {
        ui::render_compact(&result);
    } else {
        ui::render_forecast(&result);
    }

    Ok(())
}

/// Dispatch `pollencast config [...]`; no subcommand shows the config.
pub fn config(command: Option<ConfigCommand>) -> Result<()> {
    match command {
        None | Some(ConfigCommand::Show) => config_show(),
        Some(ConfigCommand::Set { key, value }) => config_set(&key, &value),
        Some(ConfigCommand::Init) => first_time_setup().map(|_| ()),
        Some(ConfigCommand::Path) => {
            println!("{}", Config::path().display());
            Ok(())
        }
    }
}

fn config_show() -> Result<()> {
    let cfg = Config::load()?;

    let api_key = if cfg.api_key.is_empty() {
        "(not set)".to_string()
    } else {
        redact_key(&cfg.api_key)
    };
    let default_zip = if cfg.default_zip.is_empty() {
        "(not set)".to_string()
    } else {
        cfg.default_zip.clone()
    };

    println!("  api_key:     {api_key}");
    println!("  default_zip: {default_zip}");
    println!("  days:        {}", cfg.days);
    println!("  config file: {}", Config::path().display());

    Ok(())
}

fn config_set(key: &str, value: &str) -> Result<()> {
    let mut cfg = Config::load()?;

    match key.to_lowercase().as_str() {
        "api_key" => cfg.api_key = value.to_string(),
        "default_zip" => cfg.default_zip = value.to_string(),
        "days" => {
            cfg.days = match value.parse::<u8>() {
                Ok(d) if (1..=5).contains(&d) => d,
                _ => bail!("days must be a number between 1 and 5"),
            };
        }
        other => bail!("unknown config key {other:?} - valid keys: api_key, default_zip, days"),
    }

    cfg.save()?;
    println!("  ✓ {key} set to {value}");

    Ok(())
}

/// Interactive guided setup; saves and returns the new config.
fn first_time_setup() -> Result<Config> {
    println!();
    println!("  Welcome to Pollencast! Let's get you set up.");
    println!();

    let api_key = prompt("  Enter your Google API key: ")?;
    if api_key.is_empty() {
        bail!("API key is required");
    }

    let default_zip = prompt("  Enter your default ZIP code (optional): ")?;

    let cfg = Config {
        api_key,
        default_zip,
        ..Config::default()
    };
    cfg.save()?;

    println!();
    println!("  ✓ Config saved to {}", Config::path().display());
    println!();

    Ok(cfg)
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// Show just enough of a key to recognize it.
///
/// Counted in characters, not bytes; keys are arbitrary user input.
fn redact_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 10 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 3..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}
