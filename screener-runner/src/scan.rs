//! Batch scan: fetch, score, and rank every instrument in a list.
//!
//! Each instrument ends in an explicit [`InstrumentOutcome`]. Provider
//! failures and short histories are outcomes, not errors; the scan keeps
//! going. A malformed bar series is a hard failure and stops the scan.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use rayon::prelude::*;
use screener_core::data::{DataError, DataProvider};
use screener_core::ranking::rank;
use screener_core::{score_bars, ScoredResult, ScoringError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::progress::ScanProgress;
use crate::report::{FailedInstrument, OutcomeCounts, ScanReport};

/// What happened to one instrument.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrumentOutcome {
    Evaluated(ScoredResult),
    /// The provider had nothing for the symbol.
    NoData,
    /// Fewer bars than the indicator warm-up needs.
    InsufficientHistory { bars: usize },
    FetchFailed { error: String },
    /// Cancellation was observed before the instrument started.
    Skipped,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to build worker pool: {0}")]
    Pool(String),

    #[error("{symbol}: {source}")]
    Scoring {
        symbol: String,
        #[source]
        source: ScoringError,
    },
}

/// Run a scan over `symbols` and rank the evaluated instruments.
///
/// `today` anchors the lookback window unless the config pins `as_of`.
/// Setting `cancel` stops new instruments from starting; instruments already
/// in flight finish and the partial report is returned with
/// `cancelled = true`.
pub fn run_scan(
    symbols: &[String],
    provider: &dyn DataProvider,
    config: &ScanConfig,
    today: NaiveDate,
    cancel: &AtomicBool,
    progress: &dyn ScanProgress,
) -> Result<ScanReport, ScanError> {
    let (start, end) = config.date_range(today);
    let total = symbols.len();
    // Raised on a hard failure so the remaining workers stop early
    let abort = AtomicBool::new(false);

    info!(
        instruments = total,
        provider = provider.name(),
        %start,
        %end,
        workers = config.workers,
        "starting scan"
    );

    let scan_one = |(index, symbol): (usize, &String)| -> Result<InstrumentOutcome, ScanError> {
        if cancel.load(Ordering::Relaxed) || abort.load(Ordering::Relaxed) {
            return Ok(InstrumentOutcome::Skipped);
        }
        progress.on_start(symbol, index, total);
        let outcome = match evaluate_instrument(symbol, provider, start, end) {
            Ok(outcome) => outcome,
            Err(e) => {
                abort.store(true, Ordering::Relaxed);
                return Err(e);
            }
        };
        progress.on_complete(symbol, index, total, &outcome);
        Ok(outcome)
    };

    let outcomes: Vec<Result<InstrumentOutcome, ScanError>> = if config.workers > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()
            .map_err(|e| ScanError::Pool(e.to_string()))?;
        pool.install(|| symbols.par_iter().enumerate().map(scan_one).collect())
    } else {
        symbols.iter().enumerate().map(scan_one).collect()
    };
    let outcomes = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;

    let cancelled = cancel.load(Ordering::Relaxed);
    let mut counts = OutcomeCounts::default();
    let mut failures = Vec::new();
    let mut evaluated = Vec::new();

    for (symbol, outcome) in symbols.iter().zip(outcomes) {
        counts.record(&outcome);
        match outcome {
            InstrumentOutcome::Evaluated(result) => evaluated.push(result),
            InstrumentOutcome::FetchFailed { error } => failures.push(FailedInstrument {
                symbol: symbol.clone(),
                error,
            }),
            _ => {}
        }
    }

    progress.on_batch_complete(&counts);
    info!(
        evaluated = counts.evaluated,
        no_data = counts.no_data,
        insufficient_history = counts.insufficient_history,
        failed = counts.failed,
        skipped = counts.skipped,
        cancelled,
        "scan complete"
    );

    Ok(ScanReport::new(
        config,
        rank(evaluated, config.top_n),
        counts,
        failures,
        cancelled,
    ))
}

/// Fetch and score one instrument.
pub fn evaluate_instrument(
    symbol: &str,
    provider: &dyn DataProvider,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<InstrumentOutcome, ScanError> {
    let fetched = match provider.fetch(symbol, start, end) {
        Ok(fetched) => fetched,
        Err(e) if e.is_no_data() => {
            debug!(symbol, "no data");
            return Ok(InstrumentOutcome::NoData);
        }
        Err(e) => return Ok(fetch_failed(symbol, &e)),
    };

    if fetched.bars.is_empty() {
        debug!(symbol, "no data");
        return Ok(InstrumentOutcome::NoData);
    }

    match score_bars(symbol, &fetched.bars) {
        Ok(Some(result)) => {
            debug!(symbol, score = result.score, action = %result.action, "evaluated");
            Ok(InstrumentOutcome::Evaluated(result))
        }
        Ok(None) => {
            debug!(symbol, bars = fetched.bars.len(), "insufficient history");
            Ok(InstrumentOutcome::InsufficientHistory {
                bars: fetched.bars.len(),
            })
        }
        Err(source) => Err(ScanError::Scoring {
            symbol: symbol.to_string(),
            source,
        }),
    }
}

fn fetch_failed(symbol: &str, error: &DataError) -> InstrumentOutcome {
    warn!(symbol, %error, "fetch failed");
    InstrumentOutcome::FetchFailed {
        error: error.to_string(),
    }
}
