//! Terminal progress bar for scans.

use indicatif::{ProgressBar, ProgressStyle};
use screener_runner::{InstrumentOutcome, OutcomeCounts, ScanProgress};

pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(total: usize) -> anyhow::Result<Self> {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=> "),
        );
        Ok(Self { bar })
    }
}

impl ScanProgress for BarProgress {
    fn on_start(&self, symbol: &str, _index: usize, _total: usize) {
        self.bar.set_message(symbol.to_string());
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        outcome: &InstrumentOutcome,
    ) {
        if let InstrumentOutcome::FetchFailed { error } = outcome {
            self.bar.println(format!("  {symbol}: {error}"));
        }
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, _counts: &OutcomeCounts) {
        self.bar.finish_and_clear();
    }
}
