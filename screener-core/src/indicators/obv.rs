//! On-Balance Volume (OBV).
//!
//! Running total of signed volume: + volume when the close rose against the
//! prior bar, - volume when it fell, 0 when unchanged. The first bar
//! contributes 0. Never reset.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone, Default)]
pub struct Obv;

impl Obv {
    pub fn new() -> Self {
        Self
    }

    /// Integer running totals, one per bar.
    pub fn totals(&self, bars: &[Bar]) -> Vec<i64> {
        let mut running = 0i64;
        let mut totals = Vec::with_capacity(bars.len());
        for (i, bar) in bars.iter().enumerate() {
            if i > 0 {
                let prev = bars[i - 1].close;
                let volume = i64::try_from(bar.volume).unwrap_or(i64::MAX);
                if bar.close > prev {
                    running = running.saturating_add(volume);
                } else if bar.close < prev {
                    running = running.saturating_sub(volume);
                }
            }
            totals.push(running);
        }
        totals
    }
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        "obv"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        self.totals(bars).into_iter().map(|v| v as f64).collect()
    }
}
