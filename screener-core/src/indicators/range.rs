//! Trailing price range: highest high or lowest low over a window.
//!
//! Feeds the stochastic oscillator's `high_max` / `low_min`.
//! Lookback: period - 1.

use super::Indicator;
use crate::domain::Bar;

/// Which edge of the trailing range to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    HighestHigh,
    LowestLow,
}

#[derive(Debug, Clone)]
pub struct PriceRange {
    period: usize,
    bound: RangeBound,
    name: String,
}

impl PriceRange {
    pub fn highest_high(period: usize) -> Self {
        assert!(period >= 1, "range period must be >= 1");
        Self {
            period,
            bound: RangeBound::HighestHigh,
            name: format!("highest_high_{period}"),
        }
    }

    pub fn lowest_low(period: usize) -> Self {
        assert!(period >= 1, "range period must be >= 1");
        Self {
            period,
            bound: RangeBound::LowestLow,
            name: format!("lowest_low_{period}"),
        }
    }

    pub fn bound(&self) -> RangeBound {
        self.bound
    }
}

impl Indicator for PriceRange {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period {
            return result;
        }

        let field = |bar: &Bar| match self.bound {
            RangeBound::HighestHigh => bar.high,
            RangeBound::LowestLow => bar.low,
        };

        for i in (self.period - 1)..n {
            let window = &bars[(i + 1 - self.period)..=i];
            if window.iter().any(|b| field(b).is_nan()) {
                continue;
            }
            let values = window.iter().map(field);
            result[i] = match self.bound {
                RangeBound::HighestHigh => values.fold(f64::NEG_INFINITY, f64::max),
                RangeBound::LowestLow => values.fold(f64::INFINITY, f64::min),
            };
        }

        result
    }
}
