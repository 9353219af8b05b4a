//! Allocation requests: how an amount is split.
//!
//! Each variant validates itself on construction, so an allocator never
//! sees a request it cannot honour.

use apportion_shared::{MoneyError, Percentage};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::AllocationError;

/// Largest ratio deficit (as a fraction of one) absorbed by normalization.
pub const RATIO_TOLERANCE: Decimal = Decimal::from_parts(9, 0, 0, false, 14);

/// Split into `n` equal parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EvenParts(usize);

impl EvenParts {
    /// Creates a request for `n` parts. Fails unless `n > 0`.
    pub fn new(n: i64) -> Result<Self, AllocationError> {
        usize::try_from(n)
            .ok()
            .filter(|parts| *parts > 0)
            .map(Self)
            .ok_or(AllocationError::InvalidParts(n))
    }

    /// Number of parts.
    #[must_use]
    pub const fn parts(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for EvenParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EvenParts({})", self.0)
    }
}

/// Split proportionally to percentages summing to exactly 100%.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Ratios(Vec<Percentage>);

impl Ratios {
    /// Creates a validated ratio list.
    ///
    /// Every negative entry is reported, not only the first.
    pub fn new(ratios: Vec<Percentage>) -> Result<Self, AllocationError> {
        if ratios.is_empty() {
            return Err(AllocationError::EmptyRatios);
        }

        let negatives: Vec<Percentage> = ratios
            .iter()
            .copied()
            .filter(Percentage::is_negative)
            .collect();
        if !negatives.is_empty() {
            return Err(AllocationError::NegativeRatios(negatives));
        }

        let sum = Self::total(&ratios)?;
        if !Percentage::new(sum).is_one_hundred() {
            return Err(AllocationError::RatiosSum { sum: sum.normalize() });
        }

        Ok(Self(ratios))
    }

    /// Creates a ratio list from percent values.
    pub fn from_values(values: &[Decimal]) -> Result<Self, AllocationError> {
        Self::new(values.iter().copied().map(Percentage::new).collect())
    }

    /// Absorbs a tiny shortfall below 100% into the first ratio, then validates.
    ///
    /// Shortfalls up to [`RATIO_TOLERANCE`] (measured as a fraction of one)
    /// come from values that were computed in binary floating point elsewhere.
    /// Larger shortfalls and any surplus are rejected by validation.
    pub fn normalized(mut ratios: Vec<Percentage>) -> Result<Self, AllocationError> {
        let deficit = Decimal::ONE_HUNDRED
            .checked_sub(Self::total(&ratios)?)
            .ok_or(MoneyError::Overflow)?;
        let tolerance = RATIO_TOLERANCE * Decimal::ONE_HUNDRED;
        if deficit > Decimal::ZERO && deficit <= tolerance {
            if let Some(first) = ratios.first_mut() {
                let nudged = first
                    .value()
                    .checked_add(deficit)
                    .ok_or(MoneyError::Overflow)?;
                *first = Percentage::new(nudged);
            }
        }
        Self::new(ratios)
    }

    fn total(ratios: &[Percentage]) -> Result<Decimal, AllocationError> {
        ratios
            .iter()
            .try_fold(Decimal::ZERO, |sum, ratio| sum.checked_add(ratio.value()))
            .ok_or(AllocationError::Money(MoneyError::Overflow))
    }

    /// The ratios.
    #[must_use]
    pub fn ratios(&self) -> &[Percentage] {
        &self.0
    }

    /// Number of ratios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a valid ratio list has at least one entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Ratios {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ratios: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "Ratios[{}]", ratios.join(", "))
    }
}

/// Describes how to split an amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationRequest {
    /// Equal parts.
    EvenParts(EvenParts),
    /// Proportional parts.
    Ratios(Ratios),
}

impl AllocationRequest {
    /// Shorthand for a validated even split.
    pub fn even(n: i64) -> Result<Self, AllocationError> {
        EvenParts::new(n).map(Self::EvenParts)
    }

    /// Shorthand for a validated proportional split from percent values.
    pub fn ratios(values: &[Decimal]) -> Result<Self, AllocationError> {
        Ratios::from_values(values).map(Self::Ratios)
    }

    /// Number of shares the request produces.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::EvenParts(parts) => parts.parts(),
            Self::Ratios(ratios) => ratios.len(),
        }
    }

    /// Always false: every valid request produces at least one share.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<EvenParts> for AllocationRequest {
    fn from(parts: EvenParts) -> Self {
        Self::EvenParts(parts)
    }
}

impl From<Ratios> for AllocationRequest {
    fn from(ratios: Ratios) -> Self {
        Self::Ratios(ratios)
    }
}

impl std::fmt::Display for AllocationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EvenParts(parts) => parts.fmt(f),
            Self::Ratios(ratios) => ratios.fmt(f),
        }
    }
}
