//! Shared value types, errors, and configuration for Apportion.
//!
//! This crate provides the monetary building blocks used by the allocation
//! engine:
//! - Money with decimal precision, currency and rounding policy
//! - Currency descriptors and identity
//! - Rounding modes and policies
//! - Percentages and exchange rates
//! - Money error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::MoneyConfig;
pub use error::{MoneyError, MoneyResult};
pub use types::{
    Currency, CurrencyDescriptor, CurrencyKind, ExchangeRate, Money, Percentage, Rounding,
    RoundingMode,
};
