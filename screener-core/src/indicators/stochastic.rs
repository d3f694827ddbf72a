//! Stochastic oscillator (%K / %D).
//!
//! %K = 100 * (close - lowest_low) / (highest_high - lowest_low) over `k_period` bars.
//! A range of exactly zero is replaced with [`ZERO_RANGE_EPSILON`].
//! %D = `d_period`-bar simple mean of %K.

use super::range::PriceRange;
use super::sma::rolling_mean;
use super::Indicator;
use crate::domain::Bar;

/// Substitute denominator when the high/low range is exactly zero.
pub const ZERO_RANGE_EPSILON: f64 = 1e-4;

/// Which stochastic line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
    line: StochasticLine,
    name: String,
}

impl Stochastic {
    pub fn k(k_period: usize, d_period: usize) -> Self {
        Self::build(k_period, d_period, StochasticLine::K)
    }

    pub fn d(k_period: usize, d_period: usize) -> Self {
        Self::build(k_period, d_period, StochasticLine::D)
    }

    fn build(k_period: usize, d_period: usize, line: StochasticLine) -> Self {
        assert!(
            k_period >= 1 && d_period >= 1,
            "stochastic periods must be >= 1"
        );
        let label = match line {
            StochasticLine::K => "k",
            StochasticLine::D => "d",
        };
        Self {
            k_period,
            d_period,
            line,
            name: format!("stoch_{label}_{k_period}_{d_period}"),
        }
    }

    /// %K and %D in one pass.
    pub fn lines(&self, bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
        let highest = PriceRange::highest_high(self.k_period).compute(bars);
        let lowest = PriceRange::lowest_low(self.k_period).compute(bars);

        let k: Vec<f64> = bars
            .iter()
            .zip(highest.iter().zip(&lowest))
            .map(|(bar, (&high, &low))| {
                let mut range = high - low;
                if range == 0.0 {
                    range = ZERO_RANGE_EPSILON;
                }
                100.0 * (bar.close - low) / range
            })
            .collect();
        let d = rolling_mean(&k, self.d_period);
        (k, d)
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            StochasticLine::K => self.k_period - 1,
            StochasticLine::D => self.k_period + self.d_period - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (k, d) = self.lines(bars);
        match self.line {
            StochasticLine::K => k,
            StochasticLine::D => d,
        }
    }
}
