//! Screener Core — bars, indicators, signal scoring, action classification,
//! ranking, and market-data collaborators.
//!
//! The scoring pipeline is pure and bar-series in, ranked results out:
//! - Indicator calculation over a daily OHLCV series (MAs, RSI, MACD,
//!   Stochastic, OBV)
//! - Signal evaluation over the last rows into a score and a signal list
//! - Score-to-action classification
//! - Descending ranking with a top-N cut
//!
//! Data providers, pacing, and the instrument list live in [`data`] and never
//! feed back into scoring beyond handing over `&[Bar]`.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod ranking;
pub mod result;
pub mod signals;

pub use result::{score_bars, DisplayRecord, ScoredResult, ScoringError};
