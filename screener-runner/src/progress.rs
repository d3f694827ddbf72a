//! Scan progress callbacks.

use crate::report::OutcomeCounts;
use crate::scan::InstrumentOutcome;

/// Progress callback for a scan.
///
/// Called from worker threads; `index` is the instrument's position in the
/// input list, not the completion order.
pub trait ScanProgress: Send + Sync {
    /// Called when an instrument starts.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when an instrument finishes with any outcome.
    fn on_complete(&self, symbol: &str, index: usize, total: usize, outcome: &InstrumentOutcome);

    /// Called once after the last instrument, including after cancellation.
    fn on_batch_complete(&self, counts: &OutcomeCounts);
}

/// Progress reporter that ignores every event.
pub struct NoProgress;

impl ScanProgress for NoProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}

    fn on_complete(
        &self,
        _symbol: &str,
        _index: usize,
        _total: usize,
        _outcome: &InstrumentOutcome,
    ) {
    }

    fn on_batch_complete(&self, _counts: &OutcomeCounts) {}
}
