//! Percentage value type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{MoneyError, MoneyResult};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// A percent-valued decimal: `Percentage::new(dec!(25))` is 25%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// One hundred percent.
    pub const ONE_HUNDRED: Self = Self(HUNDRED);

    /// Creates a percentage from a percent value (25 means 25%).
    #[must_use]
    pub fn new(value: Decimal) -> Self {
        Self(value.normalize())
    }

    /// Creates a percentage from a ratio (0.25 means 25%).
    pub fn from_ratio(ratio: Decimal) -> MoneyResult<Self> {
        ratio
            .checked_mul(HUNDRED)
            .map(Self::new)
            .ok_or(MoneyError::Overflow)
    }

    /// The percent value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// The ratio this percentage represents (value / 100).
    #[must_use]
    pub fn decimal(&self) -> Decimal {
        (self.0 / HUNDRED).normalize()
    }

    /// Returns true for 0%.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true for values below 0%.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns true for exactly 100%.
    #[must_use]
    pub fn is_one_hundred(&self) -> bool {
        self.0 == HUNDRED
    }
}

impl std::fmt::Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
