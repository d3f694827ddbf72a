//! Indicator calculator: bar series in, `IndicatorRow` series out.
//!
//! Every indicator series is computed once over the whole input and then
//! zipped into rows. The input is never mutated; the output is a fresh,
//! immutable sequence of the same length.

use super::{Indicator, Macd, Obv, Rsi, Sma, Stochastic};
use crate::domain::{validate_series, Bar, IndicatorRow, SeriesError};

/// Bars required before any rows are produced (the MA200 window).
pub const MIN_HISTORY: usize = 200;

/// The fixed indicator set: MA 9/20/50/200, RSI(14), MACD(12,26,9),
/// Stochastic(14,3), OBV.
#[derive(Debug, Clone)]
pub struct IndicatorCalculator {
    ma9: Sma,
    ma20: Sma,
    ma50: Sma,
    ma200: Sma,
    rsi: Rsi,
    macd: Macd,
    stochastic: Stochastic,
    obv: Obv,
}

impl Default for IndicatorCalculator {
    fn default() -> Self {
        Self {
            ma9: Sma::new(9),
            ma20: Sma::new(20),
            ma50: Sma::new(50),
            ma200: Sma::new(200),
            rsi: Rsi::new(14),
            macd: Macd::macd(12, 26, 9),
            stochastic: Stochastic::k(14, 3),
            obv: Obv::new(),
        }
    }
}

impl IndicatorCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute indicator rows for a bar series.
    ///
    /// Returns `Ok(None)` when the series is shorter than [`MIN_HISTORY`]:
    /// not enough history is an expected outcome, not a failure. A series
    /// that breaks the ordering contract is an error.
    pub fn calculate(&self, bars: &[Bar]) -> Result<Option<Vec<IndicatorRow>>, SeriesError> {
        validate_series(bars)?;
        if bars.len() < MIN_HISTORY {
            return Ok(None);
        }

        let ma9 = self.ma9.compute(bars);
        let ma20 = self.ma20.compute(bars);
        let ma50 = self.ma50.compute(bars);
        let ma200 = self.ma200.compute(bars);
        let rsi = self.rsi.compute(bars);
        let (macd, macd_signal) = self.macd.lines(bars);
        let (stoch_k, stoch_d) = self.stochastic.lines(bars);
        let obv = self.obv.totals(bars);

        let rows = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorRow {
                bar: bar.clone(),
                ma9: ma9[i],
                ma20: ma20[i],
                ma50: ma50[i],
                ma200: ma200[i],
                rsi: rsi[i],
                macd: macd[i],
                macd_signal: macd_signal[i],
                stoch_k: stoch_k[i],
                stoch_d: stoch_d[i],
                obv: obv[i],
            })
            .collect();

        Ok(Some(rows))
    }
}

/// Compute indicator rows with the default indicator set.
pub fn calculate_indicators(bars: &[Bar]) -> Result<Option<Vec<IndicatorRow>>, SeriesError> {
    IndicatorCalculator::default().calculate(bars)
}
