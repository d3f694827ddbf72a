//! Screener Runner — batch scan orchestration on top of `screener-core`.
//!
//! This crate provides:
//! - TOML scan configuration with a content fingerprint
//! - The batch scan: per-instrument fetch and scoring with explicit outcomes,
//!   a worker pool, and cooperative cancellation
//! - Progress callbacks
//! - The scan report and its JSON/CSV export

pub mod config;
pub mod progress;
pub mod report;
pub mod scan;

pub use config::{ConfigError, ScanConfig, DEFAULT_LOOKBACK_DAYS};
pub use progress::{NoProgress, ScanProgress};
pub use report::{ExportError, FailedInstrument, OutcomeCounts, ScanReport};
pub use scan::{evaluate_instrument, run_scan, InstrumentOutcome, ScanError};
