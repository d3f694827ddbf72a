//! Moving Average Convergence Divergence (MACD).
//!
//! MACD line = EMA(fast) of close - EMA(slow) of close.
//! Signal line = EMA(signal) of the MACD line.
//! Two lines (separate Indicator instances), defined from index slow-1 and
//! slow+signal-2 respectively.

use super::ema::ema_of_series;
use super::Indicator;
use crate::domain::Bar;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Macd,
    Signal,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn macd(fast: usize, slow: usize, signal: usize) -> Self {
        Self::build(fast, slow, signal, MacdLine::Macd)
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::build(fast, slow, signal, MacdLine::Signal)
    }

    fn build(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be below slow period");
        let prefix = match line {
            MacdLine::Macd => "macd",
            MacdLine::Signal => "macd_signal",
        };
        Self {
            fast,
            slow,
            signal,
            line,
            name: format!("{prefix}_{fast}_{slow}_{signal}"),
        }
    }

    /// Both lines in one pass over the closes.
    pub fn lines(&self, bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);
        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema_of_series(&macd, self.signal);
        (macd, signal)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            MacdLine::Macd => self.slow - 1,
            MacdLine::Signal => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (macd, signal) = self.lines(bars);
        match self.line {
            MacdLine::Macd => macd,
            MacdLine::Signal => signal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    fn trending(n: usize) -> Vec<Bar> {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        make_bars(&closes)
    }

    #[test]
    fn warmup_lengths_match_lookback() {
        let bars = trending(60);
        let macd = Macd::macd(12, 26, 9);
        let signal = Macd::signal(12, 26, 9);
        let m = macd.compute(&bars);
        let s = signal.compute(&bars);

        assert!(m[24].is_nan());
        assert!(!m[25].is_nan());
        assert_eq!(macd.lookback(), 25);
        assert!(s[32].is_nan());
        assert!(!s[33].is_nan());
        assert_eq!(signal.lookback(), 33);
    }

    #[test]
    fn flat_prices_give_zero_macd() {
        let bars = make_bars(&[100.0; 60]);
        let (macd, signal) = Macd::macd(12, 26, 9).lines(&bars);
        assert_approx(macd[59], 0.0, 1e-9);
        assert_approx(signal[59], 0.0, 1e-9);
    }

    #[test]
    fn uptrend_has_positive_macd() {
        let bars = trending(80);
        let (macd, _) = Macd::macd(12, 26, 9).lines(&bars);
        assert!(macd[79] > 0.0);
    }

    #[test]
    fn names_distinguish_lines() {
        assert_eq!(Macd::macd(12, 26, 9).name(), "macd_12_26_9");
        assert_eq!(Macd::signal(12, 26, 9).name(), "macd_signal_12_26_9");
    }
}
