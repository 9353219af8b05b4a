//! Property-based tests for money arithmetic.
//!
//! - Summation rounds once, at the end
//! - Rounding is idempotent and respects precision
//! - Negation and addition laws

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{Currency, Money, Rounding, RoundingMode};

/// Strategy to generate amounts with up to 6 decimal places (-1,000,000 to 1,000,000).
fn fine_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

/// Strategy to generate rounding modes.
fn rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop_oneof![
        Just(RoundingMode::Up),
        Just(RoundingMode::Down),
        Just(RoundingMode::Ceiling),
        Just(RoundingMode::Floor),
        Just(RoundingMode::HalfUp),
        Just(RoundingMode::HalfDown),
        Just(RoundingMode::HalfEven),
    ]
}

fn usd() -> Currency {
    Currency::fiat("USD", 2).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Summation
    // =========================================================================

    /// Summing unrounded terms rounds the exact total exactly once.
    #[test]
    fn prop_sum_rounds_once(
        amounts in prop::collection::vec(fine_amount(), 1..20),
        mode in rounding_mode(),
    ) {
        let rounding = Rounding::precise(2, mode);
        let terms: Vec<Money> = amounts
            .iter()
            .enumerate()
            .map(|(index, amount)| {
                let policy = if index == 0 { rounding } else { Rounding::None };
                Money::with_rounding(*amount, usd(), policy)
            })
            .collect();

        // The first term carries the policy; its amount is already rounded.
        let exact: Decimal = terms.iter().map(Money::amount).sum();
        let total = Money::sum(&terms).unwrap();
        prop_assert_eq!(total.amount(), rounding.apply(exact));
        prop_assert_eq!(total.rounding(), rounding);
    }

    // =========================================================================
    // Rounding
    // =========================================================================

    /// Rounding an already rounded value changes nothing.
    #[test]
    fn prop_rounding_is_idempotent(amount in fine_amount(), mode in rounding_mode()) {
        let money = Money::with_rounding(amount, usd(), Rounding::precise(2, mode));
        prop_assert_eq!(money.round(), money.clone());
        prop_assert!(money.amount().scale() <= 2);
    }

    // =========================================================================
    // Arithmetic laws
    // =========================================================================

    /// Negation is an involution.
    #[test]
    fn prop_negation_involution(amount in fine_amount()) {
        let money = Money::of(amount, usd());
        prop_assert_eq!(-(-&money), money);
    }

    /// Addition commutes.
    #[test]
    fn prop_addition_commutes(a in fine_amount(), b in fine_amount()) {
        let a = Money::of(a, usd());
        let b = Money::of(b, usd());
        prop_assert_eq!(a.checked_add(&b).unwrap(), b.checked_add(&a).unwrap());
    }
}
