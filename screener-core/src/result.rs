//! Scored results and their display form.

use crate::domain::{Bar, IndicatorRow, SeriesError};
use crate::indicators::calculate_indicators;
use crate::signals::{
    evaluate, rsi_descriptor, Action, MacdCross, ObvTrend, RsiZone, SignalError,
    SignalEvaluation, SignalKind, StochCross, Trend,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Evaluation outcome for one instrument. Immutable once built.
///
/// `score` is the internal sort key; it is dropped from [`DisplayRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub symbol: String,
    pub last_close: f64,
    pub last_volume: u64,
    pub trend: Trend,
    pub obv_trend: ObvTrend,
    pub macd_cross: MacdCross,
    pub rsi: f64,
    pub rsi_zone: RsiZone,
    pub stoch_cross: StochCross,
    pub action: Action,
    pub signals: Vec<SignalKind>,
    pub score: f64,
}

impl ScoredResult {
    /// Build from an evaluation and the row it was taken at.
    pub fn new(symbol: impl Into<String>, last: &IndicatorRow, eval: SignalEvaluation) -> Self {
        Self {
            symbol: symbol.into(),
            last_close: last.close(),
            last_volume: last.volume(),
            trend: eval.trend,
            obv_trend: eval.obv_trend,
            macd_cross: eval.macd_cross,
            rsi: eval.rsi,
            rsi_zone: eval.rsi_zone,
            stoch_cross: eval.stoch_cross,
            action: Action::classify(eval.score),
            signals: eval.signals,
            score: eval.score,
        }
    }

    pub fn rsi_descriptor(&self) -> String {
        rsi_descriptor(self.rsi, self.rsi_zone)
    }

    /// Signals joined with ", ", or "-" when none fired.
    pub fn signal_summary(&self) -> String {
        if self.signals.is_empty() {
            "-".to_string()
        } else {
            self.signals
                .iter()
                .map(|s| s.label())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// The externally displayed record: strings only, score stripped.
    pub fn to_display(&self, exchange_suffix: &str) -> DisplayRecord {
        DisplayRecord {
            stock: display_symbol(&self.symbol, exchange_suffix).to_string(),
            price: format_price(self.last_close),
            volume: format_volume(self.last_volume),
            trend: self.trend.to_string(),
            obv: self.obv_trend.to_string(),
            macd: self.macd_cross.to_string(),
            rsi: self.rsi_descriptor(),
            stoch: self.stoch_cross.to_string(),
            action: self.action,
            signal: self.signal_summary(),
        }
    }
}

/// One row of the presented table. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    #[serde(rename = "Stock")]
    pub stock: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Vol")]
    pub volume: String,
    #[serde(rename = "Trend")]
    pub trend: String,
    #[serde(rename = "OBV")]
    pub obv: String,
    #[serde(rename = "MACD")]
    pub macd: String,
    #[serde(rename = "RSI")]
    pub rsi: String,
    #[serde(rename = "Stoch")]
    pub stoch: String,
    #[serde(rename = "Action")]
    pub action: Action,
    #[serde(rename = "Signal")]
    pub signal: String,
}

impl DisplayRecord {
    pub const HEADERS: [&'static str; 10] = [
        "Stock", "Price", "Vol", "Trend", "OBV", "MACD", "RSI", "Stoch", "Action", "Signal",
    ];

    /// Cell text in column order. The action cell is the bare label.
    pub fn cells(&self) -> [String; 10] {
        [
            self.stock.clone(),
            self.price.clone(),
            self.volume.clone(),
            self.trend.clone(),
            self.obv.clone(),
            self.macd.clone(),
            self.rsi.clone(),
            self.stoch.clone(),
            self.action.label().to_string(),
            self.signal.clone(),
        ]
    }
}

/// Errors from scoring one instrument's bars.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("malformed bar series: {0}")]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Signal(#[from] SignalError),
}

/// Run the full per-instrument pipeline: indicators, signals, action.
///
/// `Ok(None)` means the series is too short to score.
pub fn score_bars(symbol: &str, bars: &[Bar]) -> Result<Option<ScoredResult>, ScoringError> {
    let Some(rows) = calculate_indicators(bars)? else {
        return Ok(None);
    };
    let eval = evaluate(&rows)?;
    let last = &rows[rows.len() - 1];
    Ok(Some(ScoredResult::new(symbol, last, eval)))
}

/// Symbol without its exchange suffix (e.g. "BBCA.JK" -> "BBCA").
pub fn display_symbol<'a>(symbol: &'a str, exchange_suffix: &str) -> &'a str {
    if exchange_suffix.is_empty() {
        return symbol;
    }
    symbol.strip_suffix(exchange_suffix).unwrap_or(symbol)
}

/// Close rounded to a whole number with `,` thousands separators.
pub fn format_price(close: f64) -> String {
    let rounded = format!("{close:.0}");
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

/// Human-scaled volume: `12.3M`, `45.6K`, or the plain count.
pub fn format_volume(volume: u64) -> String {
    if volume > 1_000_000 {
        format!("{:.1}M", volume as f64 / 1_000_000.0)
    } else if volume > 1_000 {
        format!("{:.1}K", volume as f64 / 1_000.0)
    } else {
        volume.to_string()
    }
}
