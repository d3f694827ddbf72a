//! Serializable scan configuration.
//!
//! Loaded from TOML; every field has a default, so an empty file is a valid
//! config. CLI flags override individual fields after loading.

use chrono::NaiveDate;
use screener_core::data::{Pacing, DEFAULT_EXCHANGE_SUFFIX};
use screener_core::ranking::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Calendar days of history requested per instrument.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything a scan needs besides the provider and the cancel flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Ticker file, one symbol per line.
    pub tickers: PathBuf,

    /// Appended to bare tickers and stripped again for display.
    pub exchange_suffix: String,

    pub lookback_days: u32,

    /// Last day of the requested range. `None` means today.
    pub as_of: Option<NaiveDate>,

    pub top_n: usize,

    /// Concurrent instruments. 1 runs sequentially.
    pub workers: usize,

    pub pacing: Pacing,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tickers: PathBuf::from("tickers.txt"),
            exchange_suffix: DEFAULT_EXCHANGE_SUFFIX.to_string(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            as_of: None,
            top_n: DEFAULT_TOP_N,
            workers: default_workers(),
            pacing: Pacing::default(),
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl ScanConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        if self.workers == 0 {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.lookback_days == 0 {
            return Err(ConfigError::Invalid(
                "lookback_days must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Inclusive date range to request, ending at `as_of` or `today`.
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let end = self.as_of.unwrap_or(today);
        let start = end - chrono::Duration::days(i64::from(self.lookback_days));
        (start, end)
    }

    /// BLAKE3 hash of the serialized config, hex-encoded.
    ///
    /// Two scans with identical configs share a fingerprint.
    pub fn fingerprint(&self) -> String {
        // Only a non-UTF-8 ticker path fails to serialize
        let json = serde_json::to_string(self).unwrap_or_default();
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
