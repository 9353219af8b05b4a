//! Exchange rate types and logic.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::currency::Currency;
use super::money::Money;
use crate::error::{MoneyError, MoneyResult};

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRate {
    /// Source currency.
    pub from: Currency,
    /// Target currency.
    pub to: Currency,
    /// Exchange rate (1 from = rate to).
    pub rate: Decimal,
    /// Date this rate is effective.
    pub effective_date: NaiveDate,
}

impl ExchangeRate {
    /// Creates a new exchange rate.
    #[must_use]
    pub const fn new(from: Currency, to: Currency, rate: Decimal, effective_date: NaiveDate) -> Self {
        Self {
            from,
            to,
            rate,
            effective_date,
        }
    }

    /// Converts an amount denominated in the source currency.
    pub fn convert(&self, money: &Money) -> MoneyResult<Money> {
        if money.currency().code() != self.from.code() {
            return Err(MoneyError::CurrencyMismatch {
                left: money.to_string(),
                right: self.to_string(),
                operator: "*",
            });
        }
        money.convert(self.rate, &self.to)
    }

    /// Returns the inverse rate.
    pub fn inverse(&self) -> MoneyResult<Self> {
        if self.rate.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let rate = Decimal::ONE
            .checked_div(self.rate)
            .ok_or(MoneyError::Overflow)?;
        Ok(Self {
            from: self.to.clone(),
            to: self.from.clone(),
            rate,
            effective_date: self.effective_date,
        })
    }
}

impl std::fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{} {} @ {}", self.from, self.to, self.rate, self.effective_date)
    }
}
