//! File-based cache with a fixed TTL.
//!
//! One JSON file per key, each holding the serialized payload plus the time
//! it was written. Expired entries are removed lazily on read. There is no
//! locking: concurrent writers to the same key race harmlessly (last write
//! wins) and a lost write only costs a refetch.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// On-disk entry wrapping cached data with its write timestamp.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    data: serde_json::Value,
    #[serde(rename = "cachedAt")]
    cached_at: DateTime<Utc>,
}

/// Key-value store on local disk with a one-hour TTL.
#[derive(Debug)]
pub struct ForecastCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ForecastCache {
    /// Create a cache rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Default cache directory: `~/.cache/pollencast`.
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pollencast")
    }

    /// Retrieve a cached entry and how long ago it was stored.
    ///
    /// Returns `None` for missing, unparseable or expired entries; an entry
    /// past its TTL is deleted on the way out. This never surfaces an error:
    /// any broken state just reads as a miss.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<(T, Duration)> {
        let path = self.entry_path(key);
        let raw = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = serde_json::from_str(&raw).ok()?;

        let age = (Utc::now() - entry.cached_at).to_std().unwrap_or_default();
        if age > self.ttl {
            let _ = fs::remove_file(&path);
            return None;
        }

        let value = serde_json::from_value(entry.data).ok()?;
        Some((value, age))
    }

    /// Store a value under `key` with the current timestamp.
    ///
    /// Callers treat failure as best-effort; nothing downstream depends on
    /// the write landing.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let entry = CacheEntry {
            data: serde_json::to_value(value)?,
            cached_at: Utc::now(),
        };

        let path = self.entry_path(key);
        let body = serde_json::to_string(&entry)?;

        // Created owner-only; never readable with looser permissions.
        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)?;
            file.write_all(body.as_bytes())?;
        }

        #[cfg(not(unix))]
        fs::write(&path, body)?;

        Ok(())
    }

    /// Derive a cache key from a ZIP code and day count.
    ///
    /// The local calendar date is folded into the digest so entries rotate at
    /// day boundaries even before the TTL lapses, and distinct `(zip, days)`
    /// pairs can never share a key on the same day.
    pub fn key(zip: &str, days: u8) -> String {
        let today = Local::now().format("%Y-%m-%d");
        let digest = Sha256::digest(format!("{zip}_{days}_{today}"));
        digest[..8].iter().map(|b| format!("{b:02x}")).collect()
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}
