//! Rounding policy applied after every monetary arithmetic step.
//!
//! CRITICAL: Never round intermediate results by hand. A `Money` value
//! carries its own `Rounding` and every operation routes through it.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Rounding mode used when a result has more digits than the precision allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Towards zero (truncation).
    Down,
    /// Towards positive infinity.
    Ceiling,
    /// Towards negative infinity.
    Floor,
    /// Nearest neighbour, ties away from zero.
    HalfUp,
    /// Nearest neighbour, ties towards zero.
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour (Banker's Rounding).
    #[default]
    HalfEven,
}

impl RoundingMode {
    /// Returns the `rust_decimal` strategy implementing this mode.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::Up => RoundingStrategy::AwayFromZero,
            Self::Down => RoundingStrategy::ToZero,
            Self::Ceiling => RoundingStrategy::ToPositiveInfinity,
            Self::Floor => RoundingStrategy::ToNegativeInfinity,
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::HalfDown => RoundingStrategy::MidpointTowardZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Ceiling => "CEILING",
            Self::Floor => "FLOOR",
            Self::HalfUp => "HALF_UP",
            Self::HalfDown => "HALF_DOWN",
            Self::HalfEven => "HALF_EVEN",
        };
        f.write_str(name)
    }
}

/// Precision and mode policy bound to a monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rounding {
    /// Round to `precision` decimal places using `mode`.
    Precise {
        /// Number of decimal places kept.
        precision: u32,
        /// How discarded digits are handled.
        mode: RoundingMode,
    },
    /// Keep the full computed precision.
    None,
}

impl Rounding {
    /// Creates a precise rounding policy.
    #[must_use]
    pub const fn precise(precision: u32, mode: RoundingMode) -> Self {
        Self::Precise { precision, mode }
    }

    /// Applies the policy to a raw value.
    ///
    /// The result is normalized: trailing zeros are stripped.
    #[must_use]
    pub fn apply(&self, value: Decimal) -> Decimal {
        match self {
            Self::Precise { precision, mode } => value
                .round_dp_with_strategy(*precision, mode.strategy())
                .normalize(),
            Self::None => value.normalize(),
        }
    }

    /// Returns the precision, or `None` when rounding is disabled.
    #[must_use]
    pub const fn precision(&self) -> Option<u32> {
        match self {
            Self::Precise { precision, .. } => Some(*precision),
            Self::None => None,
        }
    }

    /// Returns the mode, or `None` when rounding is disabled.
    #[must_use]
    pub const fn mode(&self) -> Option<RoundingMode> {
        match self {
            Self::Precise { mode, .. } => Some(*mode),
            Self::None => None,
        }
    }

    /// Returns true when a precision is defined.
    #[must_use]
    pub const fn is_precise(&self) -> bool {
        matches!(self, Self::Precise { .. })
    }
}

impl std::fmt::Display for Rounding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Precise { precision, mode } => write!(f, "{mode}({precision})"),
            Self::None => f.write_str("NONE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(RoundingMode::Up, dec!(2.341), dec!(2.35))]
    #[case(RoundingMode::Down, dec!(2.349), dec!(2.34))]
    #[case(RoundingMode::Ceiling, dec!(-2.349), dec!(-2.34))]
    #[case(RoundingMode::Floor, dec!(-2.341), dec!(-2.35))]
    #[case(RoundingMode::HalfUp, dec!(2.345), dec!(2.35))]
    #[case(RoundingMode::HalfDown, dec!(2.345), dec!(2.34))]
    #[case(RoundingMode::HalfEven, dec!(2.345), dec!(2.34))]
    #[case(RoundingMode::HalfEven, dec!(2.355), dec!(2.36))]
    fn test_modes(#[case] mode: RoundingMode, #[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(Rounding::precise(2, mode).apply(input), expected);
    }

    #[test]
    fn test_apply_strips_trailing_zeros() {
        let rounded = Rounding::precise(2, RoundingMode::HalfEven).apply(dec!(10.500));
        assert_eq!(rounded.scale(), 1);
        assert_eq!(rounded.to_string(), "10.5");
    }

    #[test]
    fn test_none_keeps_full_precision() {
        let value = dec!(1) / dec!(3);
        assert_eq!(Rounding::None.apply(value), value);
        assert_eq!(Rounding::None.precision(), None);
        assert!(!Rounding::None.is_precise());
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&RoundingMode::HalfEven).unwrap();
        assert_eq!(json, "\"HALF_EVEN\"");
        let mode: RoundingMode = serde_json::from_str("\"CEILING\"").unwrap();
        assert_eq!(mode, RoundingMode::Ceiling);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rounding::precise(2, RoundingMode::HalfUp).to_string(), "HALF_UP(2)");
        assert_eq!(Rounding::None.to_string(), "NONE");
    }
}
