//! Application configuration stored on disk.
//!
//! Lives at `~/.config/pollencast/config.toml`. A missing file is not an
//! error; callers get defaults and may run the setup wizard. The API key can
//! be overridden at load time via the `POLLENCAST_API_KEY` environment
//! variable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Forecast days requested when nothing else is configured.
pub const DEFAULT_DAYS: u8 = 5;

/// Environment variable that overrides `api_key` from the config file.
pub const API_KEY_ENV: &str = "POLLENCAST_API_KEY";

const APP_DIR: &str = "pollencast";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google API key used for both geocoding and pollen lookups.
    #[serde(default)]
    pub api_key: String,

    /// ZIP code used when none is given on the command line.
    #[serde(default)]
    pub default_zip: String,

    /// Number of forecast days to request (1-5).
    #[serde(default = "default_days")]
    pub days: u8,
}

fn default_days() -> u8 {
    DEFAULT_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_zip: String::new(),
            days: DEFAULT_DAYS,
        }
    }
}

impl Config {
    /// Path to the config file.
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Whether a config file exists on disk.
    pub fn exists() -> bool {
        Self::path().exists()
    }

    /// Load the config from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path())
    }

    /// Load the config from an explicit path.
    ///
    /// A missing file yields defaults. Out-of-range `days` values fall back
    /// to [`DEFAULT_DAYS`] rather than failing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                cfg.api_key = key;
            }
        }

        if !(1..=5).contains(&cfg.days) {
            cfg.days = DEFAULT_DAYS;
        }

        Ok(cfg)
    }

    /// Save the config to the default path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path())
    }

    /// Save the config to an explicit path, creating parent directories.
    ///
    /// The file holds a credential, so it is created owner-only rather than
    /// written first and restricted after.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)?;
            file.write_all(contents.as_bytes())?;
        }

        #[cfg(not(unix))]
        fs::write(path, contents)?;

        Ok(())
    }

    /// Check that the config has the required fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg.days, DEFAULT_DAYS);
        assert!(cfg.default_zip.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config {
            api_key: "test-key".to_string(),
            default_zip: "94025".to_string(),
            days: 3,
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.default_zip, "94025");
        assert_eq!(loaded.days, 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config {
            api_key: "secret".to_string(),
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_out_of_range_days_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"k\"\ndays = 9\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.days, DEFAULT_DAYS);
    }

    #[test]
    fn test_env_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"file-key\"\n").unwrap();

        std::env::set_var(API_KEY_ENV, "env-key");
        let cfg = Config::load_from(&path).unwrap();
        std::env::remove_var(API_KEY_ENV);

        assert_eq!(cfg.api_key, "env-key");
    }

    #[test]
    fn test_validate_requires_api_key() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MissingApiKey)
        ));

        let cfg = Config {
            api_key: "k".to_string(),
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [not toml").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
