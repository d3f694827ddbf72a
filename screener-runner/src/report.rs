//! Scan report and export.
//!
//! Two export formats, both of the display records (score stripped):
//! - **JSON**: an array of records keyed by column name
//! - **CSV**: one header row plus one row per ranked instrument

use std::path::Path;

use chrono::{DateTime, Utc};
use screener_core::ranking::display_rows;
use screener_core::{DisplayRecord, ScoredResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ScanConfig;
use crate::scan::InstrumentOutcome;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Per-outcome instrument counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub total: usize,
    pub evaluated: usize,
    pub no_data: usize,
    pub insufficient_history: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: &InstrumentOutcome) {
        self.total += 1;
        match outcome {
            InstrumentOutcome::Evaluated(_) => self.evaluated += 1,
            InstrumentOutcome::NoData => self.no_data += 1,
            InstrumentOutcome::InsufficientHistory { .. } => self.insufficient_history += 1,
            InstrumentOutcome::FetchFailed { .. } => self.failed += 1,
            InstrumentOutcome::Skipped => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedInstrument {
    pub symbol: String,
    pub error: String,
}

/// Outcome of one scan: the ranked top-N plus bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub config_fingerprint: String,
    pub exchange_suffix: String,
    /// True when the scan stopped early; `results` are then partial.
    pub cancelled: bool,
    pub counts: OutcomeCounts,
    pub failures: Vec<FailedInstrument>,
    /// Ranked, best first, at most `top_n` long.
    pub results: Vec<ScoredResult>,
}

impl ScanReport {
    pub fn new(
        config: &ScanConfig,
        results: Vec<ScoredResult>,
        counts: OutcomeCounts,
        failures: Vec<FailedInstrument>,
        cancelled: bool,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            config_fingerprint: config.fingerprint(),
            exchange_suffix: config.exchange_suffix.clone(),
            cancelled,
            counts,
            failures,
            results,
        }
    }

    pub fn display_rows(&self) -> Vec<DisplayRecord> {
        display_rows(&self.results, &self.exchange_suffix)
    }

    pub fn export_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.display_rows())?)
    }

    pub fn export_csv(&self) -> Result<String, ExportError> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(DisplayRecord::HEADERS)?;
        for row in self.display_rows() {
            wtr.write_record(row.cells())?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        write_file(path, &self.export_json()?)
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), ExportError> {
        write_file(path, &self.export_csv()?)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ExportError> {
    std::fs::write(path, content).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}
