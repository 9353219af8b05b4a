//! Allocation results and their audit trail.

use std::ops::Neg;

use apportion_shared::{Money, MoneyResult};
use serde::Serialize;

use super::difference::DifferenceAllocation;
use super::error::AllocationError;

/// Raw calculations, per-item adjustments and final allocations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Details {
    calculations: Vec<Money>,
    adjustments: Vec<Money>,
    allocations: Vec<Money>,
}

impl Details {
    fn new(calculations: Vec<Money>, allocations: Vec<Money>) -> Result<Self, AllocationError> {
        let adjustments = allocations
            .iter()
            .zip(&calculations)
            .map(|(allocation, calculation)| allocation.checked_sub(calculation))
            .collect::<MoneyResult<Vec<_>>>()?;

        Ok(Self {
            calculations,
            adjustments,
            allocations,
        })
    }

    /// Raw shares before reconciliation.
    #[must_use]
    pub fn calculations(&self) -> &[Money] {
        &self.calculations
    }

    /// Per-item correction: allocation minus calculation.
    #[must_use]
    pub fn adjustments(&self) -> &[Money] {
        &self.adjustments
    }

    /// Final reconciled shares.
    #[must_use]
    pub fn allocations(&self) -> &[Money] {
        &self.allocations
    }

    /// Sum of the raw shares.
    pub fn calculations_total(&self) -> MoneyResult<Money> {
        Money::sum(&self.calculations)
    }

    /// Sum of the adjustments.
    pub fn adjustments_total(&self) -> MoneyResult<Money> {
        Money::sum(&self.adjustments)
    }

    /// Sum of the final shares.
    pub fn allocations_total(&self) -> MoneyResult<Money> {
        Money::sum(&self.allocations)
    }

    fn negate(&self) -> Self {
        let negate_all = |values: &[Money]| values.iter().map(Neg::neg).collect();
        Self {
            calculations: negate_all(&self.calculations),
            adjustments: negate_all(&self.adjustments),
            allocations: negate_all(&self.allocations),
        }
    }
}

/// Outcome of one allocation call.
///
/// Fully determined by the original amount, the reverse (sum of raw
/// shares), the raw shares and the difference policy; the details are
/// derived from those once, at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Allocation {
    money: Money,
    reverse: Money,
    strategy: DifferenceAllocation,
    details: Details,
}

impl Allocation {
    pub(crate) fn new(
        money: Money,
        reverse: Money,
        strategy: DifferenceAllocation,
        calculations: Vec<Money>,
        allocations: Vec<Money>,
    ) -> Result<Self, AllocationError> {
        Ok(Self {
            money,
            reverse,
            strategy,
            details: Details::new(calculations, allocations)?,
        })
    }

    /// The amount that was split.
    #[must_use]
    pub const fn money(&self) -> &Money {
        &self.money
    }

    /// Sum of the raw shares.
    #[must_use]
    pub const fn reverse(&self) -> &Money {
        &self.reverse
    }

    /// Difference policy applied to this result.
    #[must_use]
    pub const fn strategy(&self) -> &DifferenceAllocation {
        &self.strategy
    }

    /// Rounding discrepancy between the amount and the raw shares.
    pub fn difference(&self) -> MoneyResult<Money> {
        self.money.checked_sub(&self.reverse)
    }

    /// Full audit trail.
    #[must_use]
    pub const fn details(&self) -> &Details {
        &self.details
    }

    /// Final reconciled shares.
    #[must_use]
    pub fn allocations(&self) -> &[Money] {
        self.details.allocations()
    }

    /// Raw shares before reconciliation.
    #[must_use]
    pub fn calculations(&self) -> &[Money] {
        self.details.calculations()
    }

    /// Per-item corrections.
    #[must_use]
    pub fn adjustments(&self) -> &[Money] {
        self.details.adjustments()
    }

    /// Negates the amount, the reverse and every share.
    ///
    /// The policy is mirrored so the negated result stays consistent with
    /// its own inputs.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            money: -&self.money,
            reverse: -&self.reverse,
            strategy: self.strategy.clone().mirrored(),
            details: self.details.negate(),
        }
    }
}

impl Neg for Allocation {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Neg for &Allocation {
    type Output = Allocation;

    fn neg(self) -> Allocation {
        self.negate()
    }
}
