//! Money type with decimal precision, currency and rounding policy.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and applies its `Rounding`
//! after every arithmetic step. Instances never mutate.

use std::cmp::Ordering;
use std::ops::Neg;

use rust_decimal::Decimal;
use serde::Serialize;

use super::currency::Currency;
use super::rounding::{Rounding, RoundingMode};
use crate::error::{MoneyError, MoneyResult};

/// Represents a monetary amount with currency and rounding policy.
///
/// The amount is always stored rounded and with trailing zeros stripped.
/// Equality compares the numeric amount, the currency identity and the
/// rounding policy. Ordering is currency code first, then amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
    rounding: Rounding,
}

impl Money {
    fn bound(amount: Decimal, currency: Currency, rounding: Rounding) -> Self {
        Self {
            amount: rounding.apply(amount),
            currency,
            rounding,
        }
    }

    /// Creates money rounded to the currency's minor units with Banker's Rounding.
    #[must_use]
    pub fn of(amount: Decimal, currency: Currency) -> Self {
        let rounding = Rounding::precise(currency.minor_units(), RoundingMode::HalfEven);
        Self::bound(amount, currency, rounding)
    }

    /// Creates money with an explicit rounding policy.
    #[must_use]
    pub fn with_rounding(amount: Decimal, currency: Currency, rounding: Rounding) -> Self {
        Self::bound(amount, currency, rounding)
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::of(Decimal::ZERO, currency)
    }

    /// Creates a zero amount sharing this value's currency and rounding.
    #[must_use]
    pub fn zero_like(&self) -> Self {
        Self::bound(Decimal::ZERO, self.currency.clone(), self.rounding)
    }

    /// The amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// The rounding policy.
    #[must_use]
    pub const fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Returns -1, 0 or 1 following the sign of the amount.
    #[must_use]
    pub fn signum(&self) -> i32 {
        match self.amount.cmp(&Decimal::ZERO) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::bound(self.amount.abs(), self.currency.clone(), self.rounding)
    }

    /// Unary plus.
    #[must_use]
    pub fn plus(&self) -> Self {
        self.clone()
    }

    fn ensure_same_currency(&self, other: &Self, operator: &'static str) -> MoneyResult<()> {
        if self.currency.code() == other.currency.code() {
            Ok(())
        } else {
            Err(MoneyError::CurrencyMismatch {
                left: self.to_string(),
                right: other.to_string(),
                operator,
            })
        }
    }

    /// Adds two amounts in the same currency, keeping this value's rounding.
    pub fn checked_add(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other, "+")?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::bound(amount, self.currency.clone(), self.rounding))
    }

    /// Subtracts an amount in the same currency, keeping this value's rounding.
    pub fn checked_sub(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other, "-")?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::bound(amount, self.currency.clone(), self.rounding))
    }

    /// Multiplies by a factor and rounds the product.
    pub fn checked_mul(&self, factor: Decimal) -> MoneyResult<Self> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::bound(amount, self.currency.clone(), self.rounding))
    }

    /// Divides by a divisor and rounds the quotient.
    pub fn checked_div(&self, divisor: Decimal) -> MoneyResult<Self> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let amount = self
            .amount
            .checked_div(divisor)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self::bound(amount, self.currency.clone(), self.rounding))
    }

    /// Returns `self / other` as an unrounded decimal ratio.
    pub fn ratio(&self, other: &Self) -> MoneyResult<Decimal> {
        self.ensure_same_currency(other, "/")?;
        if other.amount.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        self.amount
            .checked_div(other.amount)
            .map(|value| value.normalize())
            .ok_or(MoneyError::Overflow)
    }

    /// Rounding in effect for re-rounding operations.
    ///
    /// A value without rounding falls back to its currency's minor units
    /// with Banker's Rounding.
    fn implied_rounding(&self) -> Rounding {
        match self.rounding {
            Rounding::Precise { .. } => self.rounding,
            Rounding::None => Rounding::precise(self.currency.minor_units(), RoundingMode::HalfEven),
        }
    }

    fn implied_precision(&self) -> u32 {
        self.rounding
            .precision()
            .unwrap_or_else(|| self.currency.minor_units())
    }

    /// Rounds the amount with this value's rounding policy.
    #[must_use]
    pub fn round(&self) -> Self {
        self.round_with(self.implied_rounding())
    }

    /// Rounds the amount at the current precision using `mode`.
    #[must_use]
    pub fn round_with_mode(&self, mode: RoundingMode) -> Self {
        self.round_with(Rounding::precise(self.implied_precision(), mode))
    }

    /// Rounds the amount with `rounding`, keeping this value's own policy.
    #[must_use]
    pub fn round_with(&self, rounding: Rounding) -> Self {
        Self {
            amount: rounding.apply(self.amount),
            currency: self.currency.clone(),
            rounding: self.rounding,
        }
    }

    /// Returns a copy bound to `mode` at the current (or implied) precision.
    #[must_use]
    pub fn with_mode(&self, mode: RoundingMode) -> Self {
        self.with_rounding_strategy(Rounding::precise(self.implied_precision(), mode))
    }

    /// Returns a copy bound to `rounding`, re-rounded.
    #[must_use]
    pub fn with_rounding_strategy(&self, rounding: Rounding) -> Self {
        Self::bound(self.amount, self.currency.clone(), rounding)
    }

    /// Returns a copy that keeps full precision in later arithmetic.
    #[must_use]
    pub fn no_rounding(&self) -> Self {
        self.with_rounding_strategy(Rounding::None)
    }

    /// Minimal positive step at this value's precision.
    pub fn smallest_unit(&self) -> MoneyResult<Decimal> {
        Decimal::try_new(1, self.implied_precision()).map_err(|_| MoneyError::Overflow)
    }

    /// Converts into `target` by multiplying with `rate`.
    ///
    /// The result is rounded at the target's minor units with this value's
    /// rounding mode; unrounded values stay unrounded.
    pub fn convert(&self, rate: Decimal, target: &Currency) -> MoneyResult<Self> {
        let amount = self.amount.checked_mul(rate).ok_or(MoneyError::Overflow)?;
        let rounding = match self.rounding {
            Rounding::Precise { mode, .. } => Rounding::precise(target.minor_units(), mode),
            Rounding::None => Rounding::None,
        };
        Ok(Self::bound(amount, target.clone(), rounding))
    }

    /// Sums same-currency values, rounding once at the end.
    ///
    /// Every element is accumulated at full precision and the first
    /// element's rounding is applied to the total, so rounding error does
    /// not compound across additions.
    pub fn sum<'a, I>(values: I) -> MoneyResult<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut values = values.into_iter();
        let first = values.next().ok_or(MoneyError::EmptySum)?;
        let total = values.try_fold(first.no_rounding(), |acc, value| {
            acc.checked_add(&value.no_rounding())
        })?;
        Ok(total.with_rounding_strategy(first.rounding))
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self::bound(-self.amount, self.currency, self.rounding)
    }
}

impl Neg for &Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money::bound(-self.amount, self.currency.clone(), self.rounding)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.currency
            .cmp(&other.currency)
            .then_with(|| self.amount.cmp(&other.amount))
            .then_with(|| self.rounding.cmp(&other.rounding))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.currency.minor_units().max(self.amount.scale());
        let mut shown = self.amount;
        shown.rescale(digits);
        write!(f, "{} {shown}", self.currency)
    }
}
