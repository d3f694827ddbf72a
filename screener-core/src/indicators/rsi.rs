//! Relative Strength Index (RSI).
//!
//! Average gain and average loss are simple rolling means of the positive
//! and negative close-to-close changes over `period` bars.
//! RS = avg_gain / avg_loss; RSI = 100 - 100 / (1 + RS).
//!
//! The first bar has no prior close and contributes a change of 0, so the
//! rolling means are defined from index `period - 1`.
//!
//! Sanitization: any non-finite RS (warm-up rows, zero average loss) is
//! replaced with 0, which yields RSI = 0. RSI is therefore defined on every
//! row and always lies in [0, 100).

use super::sma::rolling_mean;
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];
        for i in 1..n {
            let change = bars[i].close - bars[i - 1].close;
            if change > 0.0 {
                gains[i] = change;
            } else if change < 0.0 {
                losses[i] = -change;
            }
        }

        let avg_gain = rolling_mean(&gains, self.period);
        let avg_loss = rolling_mean(&losses, self.period);

        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&gain, &loss)| rsi_from_rs(sanitize_rs(gain / loss)))
            .collect()
    }
}

/// Replace NaN and ±Inf with 0.
fn sanitize_rs(rs: f64) -> f64 {
    if rs.is_finite() {
        rs
    } else {
        0.0
    }
}

fn rsi_from_rs(rs: f64) -> f64 {
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn rsi_all_gains_is_sanitized_to_zero() {
        // avg_loss == 0 → RS = inf → 0 → RSI = 0
        let bars = make_bars(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[5], 0.0, 1e-9);
    }

    #[test]
    fn rsi_all_losses() {
        let bars = make_bars(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[5], 0.0, 1e-9);
    }

    #[test]
    fn rsi_flat_is_zero() {
        let bars = make_bars(&[100.0; 20]);
        let result = Rsi::new(14).compute(&bars);
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn rsi_mixed_known_value() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Changes at 2..=4: -0.25, -0.48, +0.72
        // avg_gain = 0.72/3, avg_loss = 0.73/3 → RS = 0.72/0.73
        let bars = make_bars(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let result = Rsi::new(3).compute(&bars);
        let rs: f64 = 0.72 / 0.73;
        assert_approx(result[4], 100.0 - 100.0 / (1.0 + rs), 1e-6);
    }

    #[test]
    fn rsi_warmup_rows_are_zero() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0]);
        let result = Rsi::new(14).compute(&bars);
        assert!(result.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn rsi_bounds() {
        let bars = make_bars(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = Rsi::new(3).compute(&bars);
        for (i, &v) in result.iter().enumerate() {
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds at bar {i}: {v}");
        }
    }

    #[test]
    fn rsi_lookback() {
        assert_eq!(Rsi::new(14).lookback(), 13);
    }
}
