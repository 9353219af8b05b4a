//! Property-based tests for allocation.
//!
//! - Conservation: reconciled shares always sum to the original amount
//! - Shape: one share per requested part, all in the original currency
//! - Sign symmetry and determinism

use apportion_shared::{Currency, Money};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{Allocate, AllocationRequest, DifferenceAllocation};

/// Strategy to generate amounts in minor units (0.01 to 1,000,000.00).
fn positive_cents() -> impl Strategy<Value = i64> {
    1i64..100_000_000i64
}

/// Strategy to generate part counts (1 to 60).
fn part_count() -> impl Strategy<Value = i64> {
    1i64..60
}

/// Strategy to generate minor units (0 to 4).
fn minor_units() -> impl Strategy<Value = u32> {
    0u32..=4
}

/// Strategy to generate percentages summing to exactly 100, in basis points.
fn exact_percentages() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(0i64..=10_000, 0..8).prop_map(|mut cuts| {
        cuts.sort_unstable();
        let mut previous = 0;
        let mut ratios = Vec::with_capacity(cuts.len() + 1);
        for cut in cuts.into_iter().chain(std::iter::once(10_000)) {
            ratios.push(Decimal::new(cut - previous, 2));
            previous = cut;
        }
        ratios
    })
}

fn money(units: i64, minor_units: u32) -> Money {
    let currency = Currency::fiat("TST", i32::try_from(minor_units).unwrap()).unwrap();
    Money::of(Decimal::new(units, minor_units), currency)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Conservation
    // =========================================================================

    /// Even splits sum back to the original amount.
    #[test]
    fn prop_even_allocation_conserves_total(
        units in positive_cents(),
        parts in part_count(),
        scale in minor_units(),
    ) {
        let total = money(units, scale);
        let allocation = total.allocate(&AllocationRequest::even(parts).unwrap()).unwrap();
        prop_assert_eq!(allocation.details().allocations_total().unwrap(), total);
    }

    /// Proportional splits sum back to the original amount.
    #[test]
    fn prop_proportional_allocation_conserves_total(
        units in positive_cents(),
        ratios in exact_percentages(),
        scale in minor_units(),
    ) {
        let total = money(units, scale);
        let allocation = total.allocate(&AllocationRequest::ratios(&ratios).unwrap()).unwrap();
        prop_assert_eq!(allocation.details().allocations_total().unwrap(), total);
    }

    /// Adjustments account for exactly the rounding difference.
    #[test]
    fn prop_adjustments_cover_difference(
        units in positive_cents(),
        parts in part_count(),
    ) {
        let total = money(units, 2);
        let allocation = total.allocate(&AllocationRequest::even(parts).unwrap()).unwrap();
        prop_assert_eq!(
            allocation.details().adjustments_total().unwrap(),
            allocation.difference().unwrap()
        );
    }

    // =========================================================================
    // Shape
    // =========================================================================

    /// One non-negative share in the original currency per requested part.
    #[test]
    fn prop_shares_match_request(
        units in positive_cents(),
        parts in part_count(),
    ) {
        let total = money(units, 2);
        let request = AllocationRequest::even(parts).unwrap();
        let allocation = total.allocate(&request).unwrap();

        prop_assert_eq!(allocation.allocations().len(), request.len());
        for share in allocation.allocations() {
            prop_assert!(!share.is_negative(), "share {} is negative", share);
            prop_assert_eq!(share.currency(), total.currency());
        }
    }

    /// Shares stay within one minimal unit of the raw share when distributed.
    #[test]
    fn prop_distributed_adjustments_are_single_units(
        units in positive_cents(),
        parts in part_count(),
    ) {
        let total = money(units, 2);
        let allocation = total.allocate(&AllocationRequest::even(parts).unwrap()).unwrap();
        let unit = Decimal::new(1, 2);
        for adjustment in allocation.adjustments() {
            prop_assert!(adjustment.amount().abs() <= unit);
        }
    }

    // =========================================================================
    // Symmetry & Determinism
    // =========================================================================

    /// Allocating a negated amount negates the result.
    #[test]
    fn prop_sign_symmetry(
        units in positive_cents(),
        ratios in exact_percentages(),
    ) {
        let request = AllocationRequest::ratios(&ratios).unwrap();
        let positive = money(units, 2).allocate(&request).unwrap();
        let negative = money(-units, 2).allocate(&request).unwrap();
        prop_assert_eq!(negative, positive.negate());
    }

    /// Same inputs produce structurally equal results.
    #[test]
    fn prop_allocation_is_deterministic(
        units in positive_cents(),
        parts in part_count(),
    ) {
        let total = money(units, 2);
        let request = AllocationRequest::even(parts).unwrap();
        let strategy = DifferenceAllocation::on_last_greatest();
        let first = total.allocate_with(&request, strategy.clone()).unwrap();
        let second = total.allocate_with(&request, strategy).unwrap();
        prop_assert_eq!(first, second);
    }
}
