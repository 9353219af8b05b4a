//! Money error types.

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised by monetary value operations.
///
/// All of these are caller-input validation failures; none is retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// A binary operator was applied to amounts in different currencies.
    #[error("Currency mismatch: {left} {operator} {right}")]
    CurrencyMismatch {
        /// Left operand, rendered.
        left: String,
        /// Right operand, rendered.
        right: String,
        /// Operator symbol.
        operator: &'static str,
    },

    /// Summation of an empty collection.
    #[error("Cannot sum an empty collection of money")]
    EmptySum,

    /// Division by a zero divisor.
    #[error("Division by zero")]
    DivisionByZero,

    /// Result does not fit the decimal working precision.
    #[error("Arithmetic overflow")]
    Overflow,

    /// Currency descriptor failed validation.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// Currency code is not known to any resolver.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

impl MoneyError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::EmptySum => "EMPTY_SUM",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::Overflow => "OVERFLOW",
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
        }
    }
}
