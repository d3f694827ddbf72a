//! Semantic styles for terminal output.
//!
//! The scoring core knows nothing about colors. Actions are mapped to a
//! [`SemanticStyle`] here and resolved to a terminal color only when a cell
//! is painted.

use crossterm::style::{Color, Stylize};
use screener_core::signals::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticStyle {
    /// Strong bullish
    Positive,
    /// Bullish
    Accent,
    /// Strong bearish
    Negative,
    /// Bearish
    Warning,
    Plain,
}

impl SemanticStyle {
    pub fn for_action(action: Action) -> Self {
        match action {
            Action::StrongBuy => SemanticStyle::Positive,
            Action::Buy => SemanticStyle::Accent,
            Action::StrongSell => SemanticStyle::Negative,
            Action::Sell => SemanticStyle::Warning,
            Action::Wait => SemanticStyle::Plain,
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            SemanticStyle::Positive => Some(Color::Green),
            SemanticStyle::Accent => Some(Color::Cyan),
            SemanticStyle::Negative => Some(Color::Red),
            SemanticStyle::Warning => Some(Color::Yellow),
            SemanticStyle::Plain => None,
        }
    }

    /// Wrap `text` in the style's escape codes. Plain text when colors are
    /// off or the style has no color.
    pub fn paint(self, text: &str, enabled: bool) -> String {
        match self.color() {
            Some(color) if enabled => text.with(color).bold().to_string(),
            _ => text.to_string(),
        }
    }
}
