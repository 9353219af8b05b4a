//! Difference allocation: reconciling rounding discrepancies.
//!
//! After raw shares are rounded their sum usually misses the original
//! amount by a few minimal units. A `DifferenceAllocation` decides which
//! shares absorb that difference. Every policy returns a list of the same
//! length and currency such that
//! `sum(result) == sum(shares) + difference`.
//!
//! Policies compose: `BySign` dispatches on the difference's sign,
//! `Distribute` splits the difference into smallest-unit steps and applies
//! its inner policy once per step, and `Mirrored` runs its inner policy on
//! negated inputs.

use std::cmp::Ordering;

use apportion_shared::{Money, MoneyError};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use super::error::AllocationError;

/// Which occurrence is picked when several shares qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Lowest index.
    First,
    /// Highest index.
    Last,
}

/// Value predicate used to choose the share receiving the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueTarget {
    /// The greatest share.
    Greatest,
    /// The smallest share able to absorb the difference, ranked by sign first.
    Smallest,
    /// A non-zero share.
    NonZero,
}

/// Policy for placing a rounding difference onto a list of shares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "policy", content = "with", rename_all = "snake_case")]
pub enum DifferenceAllocation {
    /// Drop the difference; shares are returned unchanged.
    Discard,
    /// Add the whole difference to the first or last share.
    OnIndex(Position),
    /// Add the whole difference to the share matching a value predicate.
    OnValue {
        /// Value predicate.
        target: ValueTarget,
        /// Tie-break between matching shares.
        position: Position,
    },
    /// Dispatch on the sign of the difference.
    BySign {
        /// Used when the difference is positive.
        positive: Box<DifferenceAllocation>,
        /// Used otherwise.
        negative: Box<DifferenceAllocation>,
    },
    /// Apply the inner policy once per smallest unit of the difference.
    Distribute(Box<DifferenceAllocation>),
    /// Apply the inner policy to negated inputs and negate the output.
    Mirrored(Box<DifferenceAllocation>),
}

impl DifferenceAllocation {
    /// Whole difference on the first share.
    #[must_use]
    pub const fn on_first() -> Self {
        Self::OnIndex(Position::First)
    }

    /// Whole difference on the last share.
    #[must_use]
    pub const fn on_last() -> Self {
        Self::OnIndex(Position::Last)
    }

    /// Whole difference on the first greatest share.
    #[must_use]
    pub const fn on_first_greatest() -> Self {
        Self::on_value(ValueTarget::Greatest, Position::First)
    }

    /// Whole difference on the last greatest share.
    #[must_use]
    pub const fn on_last_greatest() -> Self {
        Self::on_value(ValueTarget::Greatest, Position::Last)
    }

    /// Whole difference on the first smallest share.
    #[must_use]
    pub const fn on_first_smallest() -> Self {
        Self::on_value(ValueTarget::Smallest, Position::First)
    }

    /// Whole difference on the last smallest share.
    #[must_use]
    pub const fn on_last_smallest() -> Self {
        Self::on_value(ValueTarget::Smallest, Position::Last)
    }

    /// Whole difference on the first non-zero share.
    #[must_use]
    pub const fn on_first_non_zero() -> Self {
        Self::on_value(ValueTarget::NonZero, Position::First)
    }

    /// Whole difference on the last non-zero share.
    #[must_use]
    pub const fn on_last_non_zero() -> Self {
        Self::on_value(ValueTarget::NonZero, Position::Last)
    }

    const fn on_value(target: ValueTarget, position: Position) -> Self {
        Self::OnValue { target, position }
    }

    /// Dispatches on the sign of the difference.
    #[must_use]
    pub fn by_sign(positive: Self, negative: Self) -> Self {
        Self::BySign {
            positive: Box::new(positive),
            negative: Box::new(negative),
        }
    }

    /// Applies `inner` once per smallest unit of the difference.
    #[must_use]
    pub fn distribute(inner: Self) -> Self {
        Self::Distribute(Box::new(inner))
    }

    /// Sign dispatch where each side is distributed unit by unit.
    #[must_use]
    pub fn distribute_by_sign(positive: Self, negative: Self) -> Self {
        Self::by_sign(Self::distribute(positive), Self::distribute(negative))
    }

    /// Returns the policy for negated inputs. Mirroring twice is the identity.
    #[must_use]
    pub fn mirrored(self) -> Self {
        match self {
            Self::Mirrored(inner) => *inner,
            other => Self::Mirrored(Box::new(other)),
        }
    }

    /// Default policy for even splits.
    ///
    /// Positive differences spread over the first smallest shares, negative
    /// ones over the last greatest shares.
    #[must_use]
    pub fn even_default() -> Self {
        Self::distribute_by_sign(Self::on_first_smallest(), Self::on_last_greatest())
    }

    /// Default policy for proportional splits.
    ///
    /// Positive differences spread over the first smallest shares, negative
    /// ones over the last smallest positive shares.
    #[must_use]
    pub fn proportional_default() -> Self {
        Self::distribute_by_sign(Self::on_first_smallest(), Self::on_last_smallest())
    }

    /// Places `difference` onto `shares`.
    pub fn allocate(
        &self,
        difference: &Money,
        shares: Vec<Money>,
    ) -> Result<Vec<Money>, AllocationError> {
        if shares.is_empty() {
            return Err(AllocationError::EmptyShares);
        }

        match self {
            Self::Discard => Ok(shares),
            Self::OnIndex(position) => {
                let index = match position {
                    Position::First => 0,
                    Position::Last => shares.len() - 1,
                };
                place(shares, index, difference)
            }
            Self::OnValue { target, position } => {
                let index = match target {
                    ValueTarget::Greatest => greatest_index(&shares, *position),
                    ValueTarget::Smallest => smallest_index(&shares, *position, difference),
                    ValueTarget::NonZero => non_zero_index(&shares, *position),
                };
                place(shares, index, difference)
            }
            Self::BySign { positive, negative } => {
                if difference.is_positive() {
                    positive.allocate(difference, shares)
                } else {
                    negative.allocate(difference, shares)
                }
            }
            Self::Distribute(inner) => distribute(inner, difference, shares),
            Self::Mirrored(inner) => {
                let negated: Vec<Money> = shares.iter().map(|share| -share).collect();
                let allocated = inner.allocate(&-difference, negated)?;
                Ok(allocated.into_iter().map(|share| -share).collect())
            }
        }
    }
}

impl std::fmt::Display for DifferenceAllocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = |position: &Position| match position {
            Position::First => "first",
            Position::Last => "last",
        };
        match self {
            Self::Discard => f.write_str("discard"),
            Self::OnIndex(position) => write!(f, "on_{}", side(position)),
            Self::OnValue { target, position } => {
                let target = match target {
                    ValueTarget::Greatest => "greatest",
                    ValueTarget::Smallest => "smallest",
                    ValueTarget::NonZero => "non_zero",
                };
                write!(f, "on_{}_{target}", side(position))
            }
            Self::BySign { positive, negative } => write!(f, "by_sign({positive}, {negative})"),
            Self::Distribute(inner) => write!(f, "distribute({inner})"),
            Self::Mirrored(inner) => write!(f, "mirrored({inner})"),
        }
    }
}

fn place(
    mut shares: Vec<Money>,
    index: usize,
    difference: &Money,
) -> Result<Vec<Money>, AllocationError> {
    shares[index] = shares[index].checked_add(difference)?;
    Ok(shares)
}

/// Picks the highest-ranked share under `compare`.
///
/// `First` keeps the earliest of equally ranked shares, `Last` the latest.
fn pick_index<F>(shares: &[Money], position: Position, mut compare: F) -> usize
where
    F: FnMut(&Money, &Money) -> Ordering,
{
    let mut best = 0;
    for (index, share) in shares.iter().enumerate().skip(1) {
        let ordering = compare(share, &shares[best]);
        let replace = match position {
            Position::First => ordering == Ordering::Greater,
            Position::Last => ordering != Ordering::Less,
        };
        if replace {
            best = index;
        }
    }
    best
}

fn greatest_index(shares: &[Money], position: Position) -> usize {
    pick_index(shares, position, |a, b| a.amount().cmp(&b.amount()))
}

/// Index of the smallest share that can absorb `difference`.
///
/// A negative difference looks at positive shares first, then zero shares,
/// then negative ones; a positive difference looks at negative, zero, then
/// positive shares. Within a tier the smallest amount wins.
fn smallest_index(shares: &[Money], position: Position, difference: &Money) -> usize {
    let tier = |share: &Money| {
        let sign = share.signum();
        if difference.is_negative() { -sign } else { sign }
    };
    pick_index(shares, position, |a, b| {
        // Reversed: the lower (tier, amount) ranks higher.
        (tier(b), b.amount()).cmp(&(tier(a), a.amount()))
    })
}

fn non_zero_index(shares: &[Money], position: Position) -> usize {
    let found = match position {
        Position::First => shares.iter().position(|share| !share.is_zero()),
        Position::Last => shares.iter().rposition(|share| !share.is_zero()),
    };
    found.unwrap_or(match position {
        Position::First => 0,
        Position::Last => shares.len() - 1,
    })
}

/// Folds `inner` over the shares once per smallest unit of `difference`.
///
/// A difference off the unit grid leaves a sub-unit remainder, which is
/// applied as one final step so the total is still conserved.
fn distribute(
    inner: &DifferenceAllocation,
    difference: &Money,
    mut shares: Vec<Money>,
) -> Result<Vec<Money>, AllocationError> {
    let unit = difference.smallest_unit()?;
    let signed_unit = if difference.is_negative() { -unit } else { unit };
    let bind = |amount: Decimal| {
        Money::with_rounding(amount, difference.currency().clone(), difference.rounding())
    };

    let whole_units = difference
        .amount()
        .abs()
        .checked_div(unit)
        .ok_or(MoneyError::Overflow)?
        .trunc();
    let steps = whole_units.to_u64().ok_or(MoneyError::Overflow)?;
    let remainder = difference.amount() - signed_unit * whole_units;

    let step = bind(signed_unit);
    for _ in 0..steps {
        shares = inner.allocate(&step, shares)?;
    }

    if !remainder.is_zero() {
        shares = inner.allocate(&bind(remainder), shares)?;
    }

    Ok(shares)
}
