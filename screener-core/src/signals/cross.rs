//! Two-line crossover detection between consecutive rows.

use serde::{Deserialize, Serialize};

/// Direction of a crossover between a fast and a slow line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossDirection {
    /// Fast was below slow and is now above.
    Bullish,
    /// Fast was above slow and is now below.
    Bearish,
}

/// Detect a strict crossover of `fast` over `slow` between `prev` and `curr`.
///
/// Touching (equality) on either row is not a cross, and any NaN operand
/// makes both comparisons false.
pub fn detect_cross(
    prev_fast: f64,
    prev_slow: f64,
    curr_fast: f64,
    curr_slow: f64,
) -> Option<CrossDirection> {
    if prev_fast < prev_slow && curr_fast > curr_slow {
        Some(CrossDirection::Bullish)
    } else if prev_fast > prev_slow && curr_fast < curr_slow {
        Some(CrossDirection::Bearish)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bullish_cross() {
        assert_eq!(detect_cross(1.0, 2.0, 3.0, 2.5), Some(CrossDirection::Bullish));
    }

    #[test]
    fn bearish_cross() {
        assert_eq!(detect_cross(3.0, 2.0, 1.0, 2.5), Some(CrossDirection::Bearish));
    }

    #[test]
    fn touching_is_not_a_cross() {
        assert_eq!(detect_cross(2.0, 2.0, 3.0, 2.0), None);
        assert_eq!(detect_cross(1.0, 2.0, 2.0, 2.0), None);
    }

    #[test]
    fn nan_never_crosses() {
        assert_eq!(detect_cross(f64::NAN, 2.0, 3.0, 2.0), None);
        assert_eq!(detect_cross(1.0, 2.0, 3.0, f64::NAN), None);
    }

    proptest! {
        /// Swapping fast and slow inverts the direction.
        #[test]
        fn swapping_lines_inverts_direction(
            a in -100.0..100.0_f64,
            b in -100.0..100.0_f64,
            c in -100.0..100.0_f64,
            d in -100.0..100.0_f64,
        ) {
            let forward = detect_cross(a, b, c, d);
            let swapped = detect_cross(b, a, d, c);
            let inverted = forward.map(|dir| match dir {
                CrossDirection::Bullish => CrossDirection::Bearish,
                CrossDirection::Bearish => CrossDirection::Bullish,
            });
            prop_assert_eq!(swapped, inverted);
        }
    }
}
