//! Score-to-action classification.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const STRONG_THRESHOLD: f64 = 3.5;
pub const ACTION_THRESHOLD: f64 = 1.5;

/// Ordinal action label derived from a composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "WAIT")]
    Wait,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl Action {
    /// Classify a score. Thresholds are checked top-down, so a score sitting
    /// exactly on a boundary gets the stronger label.
    ///
    /// | score            | action      |
    /// |------------------|-------------|
    /// | >= 3.5           | STRONG BUY  |
    /// | [1.5, 3.5)       | BUY         |
    /// | <= -3.5          | STRONG SELL |
    /// | (-3.5, -1.5]     | SELL        |
    /// | otherwise        | WAIT        |
    pub fn classify(score: f64) -> Self {
        if score >= STRONG_THRESHOLD {
            Action::StrongBuy
        } else if score >= ACTION_THRESHOLD {
            Action::Buy
        } else if score <= -STRONG_THRESHOLD {
            Action::StrongSell
        } else if score <= -ACTION_THRESHOLD {
            Action::Sell
        } else {
            Action::Wait
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Action::StrongBuy => "STRONG BUY",
            Action::Buy => "BUY",
            Action::Wait => "WAIT",
            Action::Sell => "SELL",
            Action::StrongSell => "STRONG SELL",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_favor_stronger_label() {
        assert_eq!(Action::classify(3.5), Action::StrongBuy);
        assert_eq!(Action::classify(3.4999), Action::Buy);
        assert_eq!(Action::classify(1.5), Action::Buy);
        assert_eq!(Action::classify(1.4999), Action::Wait);
        assert_eq!(Action::classify(-1.4999), Action::Wait);
        assert_eq!(Action::classify(-1.5), Action::Sell);
        assert_eq!(Action::classify(-3.4999), Action::Sell);
        assert_eq!(Action::classify(-3.5), Action::StrongSell);
    }

    #[test]
    fn zero_waits() {
        assert_eq!(Action::classify(0.0), Action::Wait);
    }

    #[test]
    fn labels() {
        assert_eq!(Action::StrongBuy.to_string(), "STRONG BUY");
        assert_eq!(Action::StrongSell.to_string(), "STRONG SELL");
        assert_eq!(Action::Wait.to_string(), "WAIT");
    }

    proptest! {
        /// Higher scores never map to a weaker buy-side label.
        #[test]
        fn classification_is_monotonic(a in -10.0..10.0_f64, b in -10.0..10.0_f64) {
            let rank = |action: Action| match action {
                Action::StrongSell => 0,
                Action::Sell => 1,
                Action::Wait => 2,
                Action::Buy => 3,
                Action::StrongBuy => 4,
            };
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(rank(Action::classify(lo)) <= rank(Action::classify(hi)));
        }
    }
}
