//! Signal scoring: crossover detection, the weighted rule table, and the
//! score-to-action classifier.
//!
//! Everything here is a pure function of the last few indicator rows. No
//! presentation concerns (colors, markup) reach this module.

pub mod action;
pub mod cross;
pub mod evaluator;

pub use action::Action;
pub use cross::{detect_cross, CrossDirection};
pub use evaluator::{
    evaluate, rsi_descriptor, MacdCross, ObvTrend, RsiZone, SignalError, SignalEvaluation,
    SignalKind, StochCross, Trend, MIN_EVAL_ROWS,
};
