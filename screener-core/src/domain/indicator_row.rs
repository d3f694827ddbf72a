//! IndicatorRow — a bar extended with its computed indicator values.

use super::Bar;
use serde::{Deserialize, Serialize};

/// One bar plus every indicator computed at that bar.
///
/// Undefined values (warm-up) are `f64::NAN`. Rows are built once by the
/// indicator calculator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub bar: Bar,
    pub ma9: f64,
    pub ma20: f64,
    pub ma50: f64,
    pub ma200: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub stoch_k: f64,
    pub stoch_d: f64,
    pub obv: i64,
}

impl IndicatorRow {
    pub fn close(&self) -> f64 {
        self.bar.close
    }

    pub fn volume(&self) -> u64 {
        self.bar.volume
    }
}
