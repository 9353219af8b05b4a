//! Allocator: splits an amount and reconciles the rounding difference.
//!
//! The algorithm is the same for every request variant:
//! 1. Calculate raw shares (rounded with the amount's own policy)
//! 2. Sum them into the reverse, rounding once at the end
//! 3. If the reverse equals the amount, the raw shares are final
//! 4. If the first raw share already equals the whole amount, the amount
//!    cannot be split below its minimal unit: it goes to the first share
//!    and every other share is zero
//! 5. Otherwise the difference is handed to the difference policy

use apportion_shared::Money;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::difference::DifferenceAllocation;
use super::error::AllocationError;
use super::request::{AllocationRequest, EvenParts, Ratios};
use super::result::Allocation;

/// Splits money according to an `AllocationRequest`.
///
/// Without an explicit policy the allocator uses
/// [`DifferenceAllocation::even_default`] for even splits and
/// [`DifferenceAllocation::proportional_default`] for ratios.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocator {
    strategy: Option<DifferenceAllocation>,
}

impl Allocator {
    /// Creates an allocator using the per-variant default policies.
    #[must_use]
    pub const fn new() -> Self {
        Self { strategy: None }
    }

    /// Creates an allocator that always applies `strategy`.
    #[must_use]
    pub const fn with_strategy(strategy: DifferenceAllocation) -> Self {
        Self {
            strategy: Some(strategy),
        }
    }

    /// Policy used for `request`.
    #[must_use]
    pub fn strategy_for(&self, request: &AllocationRequest) -> DifferenceAllocation {
        match (&self.strategy, request) {
            (Some(strategy), _) => strategy.clone(),
            (None, AllocationRequest::EvenParts(_)) => DifferenceAllocation::even_default(),
            (None, AllocationRequest::Ratios(_)) => DifferenceAllocation::proportional_default(),
        }
    }

    /// Allocates `money` according to `request`.
    ///
    /// Fails with `UnsupportedPrecision` when `money` has no rounding
    /// precision. Negative amounts are reconciled with the mirrored policy,
    /// so splitting `-m` yields the negation of splitting `m`.
    pub fn allocate(
        &self,
        money: &Money,
        request: &AllocationRequest,
    ) -> Result<Allocation, AllocationError> {
        if !money.rounding().is_precise() {
            return Err(AllocationError::UnsupportedPrecision(money.to_string()));
        }

        let mut strategy = self.strategy_for(request);
        if money.is_negative() {
            strategy = strategy.mirrored();
        }
        trace!(%money, %request, %strategy, "allocating");

        let calculations = calculate(money, request)?;
        let reverse = Money::sum(&calculations)?;

        let allocations = if reverse == *money {
            trace!(%money, "raw shares conserve the amount");
            calculations.clone()
        } else if calculations[0] == *money {
            debug!(%money, %reverse, parts = calculations.len(), "amount is indivisible");
            indivisible(money, calculations.len())
        } else {
            let difference = money.checked_sub(&reverse)?;
            debug!(%money, %reverse, %difference, "reconciling rounding difference");
            strategy.allocate(&difference, calculations.clone())?
        };

        Allocation::new(money.clone(), reverse, strategy, calculations, allocations)
    }
}

fn calculate(money: &Money, request: &AllocationRequest) -> Result<Vec<Money>, AllocationError> {
    match request {
        AllocationRequest::EvenParts(parts) => calculate_even(money, *parts),
        AllocationRequest::Ratios(ratios) => calculate_proportional(money, ratios),
    }
}

fn calculate_even(money: &Money, parts: EvenParts) -> Result<Vec<Money>, AllocationError> {
    let share = money.checked_div(Decimal::from(parts.parts()))?;
    Ok(vec![share; parts.parts()])
}

fn calculate_proportional(money: &Money, ratios: &Ratios) -> Result<Vec<Money>, AllocationError> {
    ratios
        .ratios()
        .iter()
        .map(|ratio| money.checked_mul(ratio.decimal()).map_err(AllocationError::from))
        .collect()
}

fn indivisible(money: &Money, parts: usize) -> Vec<Money> {
    let mut allocations = vec![money.zero_like(); parts];
    allocations[0] = money.clone();
    allocations
}

/// Allocation entry points on `Money`.
pub trait Allocate {
    /// Allocates with the default policies.
    fn allocate(&self, request: &AllocationRequest) -> Result<Allocation, AllocationError>;

    /// Allocates with an explicit difference policy.
    fn allocate_with(
        &self,
        request: &AllocationRequest,
        strategy: DifferenceAllocation,
    ) -> Result<Allocation, AllocationError>;
}

impl Allocate for Money {
    fn allocate(&self, request: &AllocationRequest) -> Result<Allocation, AllocationError> {
        Allocator::new().allocate(self, request)
    }

    fn allocate_with(
        &self,
        request: &AllocationRequest,
        strategy: DifferenceAllocation,
    ) -> Result<Allocation, AllocationError> {
        Allocator::with_strategy(strategy).allocate(self, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apportion_shared::{Currency, Rounding, RoundingMode};
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money {
        Money::of(amount, Currency::fiat("USD", 2).unwrap())
    }

    fn amounts(shares: &[Money]) -> Vec<Decimal> {
        shares.iter().map(Money::amount).collect()
    }

    #[test]
    fn test_rejects_unrounded_money() {
        let money = usd(dec!(10)).no_rounding();
        let request = AllocationRequest::even(2).unwrap();
        assert!(matches!(
            Allocator::new().allocate(&money, &request),
            Err(AllocationError::UnsupportedPrecision(_))
        ));
    }

    #[test]
    fn test_no_difference_path() {
        let allocation = usd(dec!(100))
            .allocate(&AllocationRequest::even(4).unwrap())
            .unwrap();
        assert_eq!(allocation.allocations(), allocation.calculations());
        assert!(allocation.adjustments().iter().all(Money::is_zero));
        assert_eq!(allocation.reverse(), allocation.money());
    }

    #[test]
    fn test_thirds() {
        let allocation = usd(dec!(100))
            .allocate(&AllocationRequest::even(3).unwrap())
            .unwrap();
        assert_eq!(
            amounts(allocation.allocations()),
            vec![dec!(33.34), dec!(33.33), dec!(33.33)]
        );
        assert_eq!(allocation.reverse(), &usd(dec!(99.99)));
    }

    #[test]
    fn test_indivisible_amount_goes_to_first_share() {
        let money = usd(dec!(0.01)).with_mode(RoundingMode::Up);
        let allocation = Allocator::with_strategy(DifferenceAllocation::on_last())
            .allocate(&money, &AllocationRequest::even(4).unwrap())
            .unwrap();
        // Rounding up makes every raw share the whole cent.
        assert_eq!(allocation.calculations()[0], money);
        assert_eq!(
            amounts(allocation.allocations()),
            vec![dec!(0.01), dec!(0), dec!(0), dec!(0)]
        );
        assert!(allocation.allocations().iter().all(|share| !share.is_negative()));
    }

    #[test]
    fn test_explicit_strategy_overrides_defaults() {
        let allocator = Allocator::with_strategy(DifferenceAllocation::on_last());
        let allocation = allocator
            .allocate(&usd(dec!(100)), &AllocationRequest::even(3).unwrap())
            .unwrap();
        assert_eq!(
            amounts(allocation.allocations()),
            vec![dec!(33.33), dec!(33.33), dec!(33.34)]
        );
        assert_eq!(allocation.strategy(), &DifferenceAllocation::on_last());
    }

    #[test]
    fn test_negative_amount_is_mirrored() {
        let request = AllocationRequest::even(3).unwrap();
        let positive = usd(dec!(100)).allocate(&request).unwrap();
        let negative = usd(dec!(-100)).allocate(&request).unwrap();
        assert_eq!(
            amounts(negative.allocations()),
            vec![dec!(-33.34), dec!(-33.33), dec!(-33.33)]
        );
        assert_eq!(negative, positive.negate());
    }

    #[test]
    fn test_strategy_for_defaults() {
        let allocator = Allocator::default();
        assert_eq!(
            allocator.strategy_for(&AllocationRequest::even(2).unwrap()),
            DifferenceAllocation::even_default()
        );
        assert_eq!(
            allocator.strategy_for(&AllocationRequest::ratios(&[dec!(100)]).unwrap()),
            DifferenceAllocation::proportional_default()
        );
    }

    #[test]
    fn test_precision_override() {
        let money = Money::with_rounding(
            dec!(1),
            Currency::fiat("USD", 2).unwrap(),
            Rounding::precise(4, RoundingMode::HalfEven),
        );
        let allocation = money.allocate(&AllocationRequest::even(3).unwrap()).unwrap();
        assert_eq!(
            amounts(allocation.allocations()),
            vec![dec!(0.3334), dec!(0.3333), dec!(0.3333)]
        );
    }
}
