//! Monetary value types.

pub mod currency;
pub mod exchange;
pub mod money;
pub mod percentage;
pub mod rounding;

pub use currency::{Currency, CurrencyDescriptor, CurrencyKind};
pub use exchange::ExchangeRate;
pub use money::Money;
pub use percentage::Percentage;
pub use rounding::{Rounding, RoundingMode};

#[cfg(test)]
mod props;
