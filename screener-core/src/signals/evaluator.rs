//! Signal evaluator — the weighted rule table applied to the last two rows.
//!
//! Every rule is evaluated independently and its weight added to the score.
//! Crossover, RSI and stochastic rules append a label to the signal list in
//! table order; the MA200 trend and OBV trend only move the score and are
//! reported as descriptive fields.
//!
//! | Rule                      | Weight |
//! |---------------------------|--------|
//! | close vs MA200            | ±1.0   |
//! | MA9 × MA20 cross          | ±1.5   |
//! | MA20 × MA50 cross         | ±2.0   |
//! | MACD × signal cross       | ±2.0   |
//! | RSI reversal in OS/OB     | ±1.5   |
//! | Stochastic cross in OS/OB | ±1.0   |
//! | OBV vs 4 rows back        | ±0.5   |

use super::cross::{detect_cross, CrossDirection};
use crate::domain::IndicatorRow;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rows needed: the OBV rule looks back to `row[-5]`.
pub const MIN_EVAL_ROWS: usize = 5;

const TREND_WEIGHT: f64 = 1.0;
const MA_SHORT_CROSS_WEIGHT: f64 = 1.5;
const MA_MEDIUM_CROSS_WEIGHT: f64 = 2.0;
const MACD_CROSS_WEIGHT: f64 = 2.0;
const RSI_REVERSAL_WEIGHT: f64 = 1.5;
const STOCH_CROSS_WEIGHT: f64 = 1.0;
const OBV_TREND_WEIGHT: f64 = 0.5;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;
const STOCH_OVERSOLD: f64 = 20.0;
const STOCH_OVERBOUGHT: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("signal evaluation needs at least {required} rows, got {actual}")]
    NotEnoughRows { required: usize, actual: usize },
}

/// A triggered signal, in rule-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    #[serde(rename = "MA9 CROSS MA20 (BULL)")]
    Ma9CrossMa20Bull,
    #[serde(rename = "MA9 CROSS MA20 (BEAR)")]
    Ma9CrossMa20Bear,
    #[serde(rename = "MA20 CROSS MA50 (BULL)")]
    Ma20CrossMa50Bull,
    #[serde(rename = "MA20 CROSS MA50 (BEAR)")]
    Ma20CrossMa50Bear,
    #[serde(rename = "MACD BULL")]
    MacdBull,
    #[serde(rename = "MACD BEAR")]
    MacdBear,
    #[serde(rename = "RSI REV UP")]
    RsiReversalUp,
    #[serde(rename = "RSI REV DOWN")]
    RsiReversalDown,
    #[serde(rename = "STOCH BULL")]
    StochBull,
    #[serde(rename = "STOCH BEAR")]
    StochBear,
}

impl SignalKind {
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::Ma9CrossMa20Bull => "MA9 CROSS MA20 (BULL)",
            SignalKind::Ma9CrossMa20Bear => "MA9 CROSS MA20 (BEAR)",
            SignalKind::Ma20CrossMa50Bull => "MA20 CROSS MA50 (BULL)",
            SignalKind::Ma20CrossMa50Bear => "MA20 CROSS MA50 (BEAR)",
            SignalKind::MacdBull => "MACD BULL",
            SignalKind::MacdBear => "MACD BEAR",
            SignalKind::RsiReversalUp => "RSI REV UP",
            SignalKind::RsiReversalDown => "RSI REV DOWN",
            SignalKind::StochBull => "STOCH BULL",
            SignalKind::StochBear => "STOCH BEAR",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Close relative to MA200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "UP > MA200")]
    Up,
    #[serde(rename = "DOWN < MA200")]
    Down,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Trend::Up => "UP > MA200",
            Trend::Down => "DOWN < MA200",
        })
    }
}

/// OBV now vs. four rows back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ObvTrend {
    Up,
    Down,
}

impl fmt::Display for ObvTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObvTrend::Up => "UP",
            ObvTrend::Down => "DOWN",
        })
    }
}

/// MACD line vs. its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdCross {
    #[serde(rename = "GOLDEN CROSS")]
    Golden,
    #[serde(rename = "DEATH CROSS")]
    Death,
    #[serde(rename = "-")]
    None,
}

impl fmt::Display for MacdCross {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MacdCross::Golden => "GOLDEN CROSS",
            MacdCross::Death => "DEATH CROSS",
            MacdCross::None => "-",
        })
    }
}

/// Stochastic %K vs. %D inside the oversold/overbought zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StochCross {
    #[serde(rename = "CROSS UP")]
    Up,
    #[serde(rename = "CROSS DOWN")]
    Down,
    #[serde(rename = "-")]
    None,
}

impl fmt::Display for StochCross {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StochCross::Up => "CROSS UP",
            StochCross::Down => "CROSS DOWN",
            StochCross::None => "-",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    pub fn of(rsi: f64) -> Self {
        if rsi < RSI_OVERSOLD {
            RsiZone::Oversold
        } else if rsi > RSI_OVERBOUGHT {
            RsiZone::Overbought
        } else {
            RsiZone::Neutral
        }
    }
}

/// Output of one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvaluation {
    pub score: f64,
    pub signals: Vec<SignalKind>,
    pub trend: Trend,
    pub obv_trend: ObvTrend,
    pub macd_cross: MacdCross,
    pub rsi: f64,
    pub rsi_zone: RsiZone,
    pub stoch_cross: StochCross,
}

impl SignalEvaluation {
    pub fn rsi_descriptor(&self) -> String {
        rsi_descriptor(self.rsi, self.rsi_zone)
    }
}

/// RSI rounded to an integer, tagged `(OS)` / `(OB)` inside the zones.
pub fn rsi_descriptor(rsi: f64, zone: RsiZone) -> String {
    match zone {
        RsiZone::Oversold => format!("{rsi:.0} (OS)"),
        RsiZone::Overbought => format!("{rsi:.0} (OB)"),
        RsiZone::Neutral => format!("{rsi:.0}"),
    }
}

/// Score the last two rows of an indicator series.
pub fn evaluate(rows: &[IndicatorRow]) -> Result<SignalEvaluation, SignalError> {
    let n = rows.len();
    if n < MIN_EVAL_ROWS {
        return Err(SignalError::NotEnoughRows {
            required: MIN_EVAL_ROWS,
            actual: n,
        });
    }

    let curr = &rows[n - 1];
    let prev = &rows[n - 2];
    let mut score = 0.0;
    let mut signals = Vec::new();

    let trend = if curr.close() > curr.ma200 {
        score += TREND_WEIGHT;
        Trend::Up
    } else {
        score -= TREND_WEIGHT;
        Trend::Down
    };

    match detect_cross(prev.ma9, prev.ma20, curr.ma9, curr.ma20) {
        Some(CrossDirection::Bullish) => {
            signals.push(SignalKind::Ma9CrossMa20Bull);
            score += MA_SHORT_CROSS_WEIGHT;
        }
        Some(CrossDirection::Bearish) => {
            signals.push(SignalKind::Ma9CrossMa20Bear);
            score -= MA_SHORT_CROSS_WEIGHT;
        }
        None => {}
    }

    match detect_cross(prev.ma20, prev.ma50, curr.ma20, curr.ma50) {
        Some(CrossDirection::Bullish) => {
            signals.push(SignalKind::Ma20CrossMa50Bull);
            score += MA_MEDIUM_CROSS_WEIGHT;
        }
        Some(CrossDirection::Bearish) => {
            signals.push(SignalKind::Ma20CrossMa50Bear);
            score -= MA_MEDIUM_CROSS_WEIGHT;
        }
        None => {}
    }

    let macd_cross = match detect_cross(prev.macd, prev.macd_signal, curr.macd, curr.macd_signal) {
        Some(CrossDirection::Bullish) => {
            signals.push(SignalKind::MacdBull);
            score += MACD_CROSS_WEIGHT;
            MacdCross::Golden
        }
        Some(CrossDirection::Bearish) => {
            signals.push(SignalKind::MacdBear);
            score -= MACD_CROSS_WEIGHT;
            MacdCross::Death
        }
        None => MacdCross::None,
    };

    let rsi_zone = RsiZone::of(curr.rsi);
    match rsi_zone {
        RsiZone::Oversold if curr.rsi > prev.rsi => {
            signals.push(SignalKind::RsiReversalUp);
            score += RSI_REVERSAL_WEIGHT;
        }
        RsiZone::Overbought if curr.rsi < prev.rsi => {
            signals.push(SignalKind::RsiReversalDown);
            score -= RSI_REVERSAL_WEIGHT;
        }
        _ => {}
    }

    let stoch_cross = match detect_cross(prev.stoch_k, prev.stoch_d, curr.stoch_k, curr.stoch_d) {
        Some(CrossDirection::Bullish) if curr.stoch_k < STOCH_OVERSOLD => {
            signals.push(SignalKind::StochBull);
            score += STOCH_CROSS_WEIGHT;
            StochCross::Up
        }
        Some(CrossDirection::Bearish) if curr.stoch_k > STOCH_OVERBOUGHT => {
            signals.push(SignalKind::StochBear);
            score -= STOCH_CROSS_WEIGHT;
            StochCross::Down
        }
        _ => StochCross::None,
    };

    let obv_trend = if curr.obv > rows[n - MIN_EVAL_ROWS].obv {
        score += OBV_TREND_WEIGHT;
        ObvTrend::Up
    } else {
        score -= OBV_TREND_WEIGHT;
        ObvTrend::Down
    };

    Ok(SignalEvaluation {
        score,
        signals,
        trend,
        obv_trend,
        macd_cross,
        rsi: curr.rsi,
        rsi_zone,
        stoch_cross,
    })
}
