//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (span + 1).
//! Seed: the first observed value itself (no SMA seed).
//! Output stays NaN until `span` values have been observed.
//! Lookback: span - 1.

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.span.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        ema_of_series(&closes, self.span)
    }
}

/// EMA of an arbitrary series.
///
/// Leading NaNs are skipped: the average is seeded at the first non-NaN
/// value, which lets MACD's signal line run over a MACD series that is
/// undefined during its own warm-up. An interior NaN holds the previous
/// average.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if span == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut average: Option<f64> = None;
    let mut observed = 0usize;

    for (i, &value) in values.iter().enumerate() {
        if !value.is_nan() {
            observed += 1;
            average = Some(match average {
                None => value,
                Some(prev) => prev + alpha * (value - prev),
            });
        }
        if observed >= span {
            if let Some(avg) = average {
                result[i] = avg;
            }
        }
    }

    result
}
