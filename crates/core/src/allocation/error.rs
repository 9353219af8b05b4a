//! Allocation error types.

use apportion_shared::{MoneyError, Percentage};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while building a request or allocating money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    // ========== Request Errors ==========
    /// Even split into a non-positive number of parts.
    #[error("Number of parts must be positive, got {0}")]
    InvalidParts(i64),

    /// Ratios without any entry.
    #[error("Ratios must contain at least one entry")]
    EmptyRatios,

    /// Ratios not summing to exactly 100%.
    #[error("Ratios must sum to 100%, got {sum}%")]
    RatiosSum {
        /// Actual sum in percent.
        sum: Decimal,
    },

    /// Ratios containing negative entries.
    #[error("Ratios must not be negative, got {}", display_list(.0))]
    NegativeRatios(Vec<Percentage>),

    // ========== Allocation Errors ==========
    /// The amount has no rounding precision to reason about minimal units.
    #[error("Allocation requires a rounding precision, got {0}")]
    UnsupportedPrecision(String),

    /// A difference strategy received no shares.
    #[error("Cannot allocate a difference over an empty share list")]
    EmptyShares,

    /// Underlying money arithmetic failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

fn display_list(ratios: &[Percentage]) -> String {
    ratios
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl AllocationError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParts(_)
            | Self::EmptyRatios
            | Self::RatiosSum { .. }
            | Self::NegativeRatios(_) => "INVALID_ALLOCATION_REQUEST",
            Self::UnsupportedPrecision(_) => "UNSUPPORTED_ALLOCATION_PRECISION",
            Self::EmptyShares => "EMPTY_SHARES",
            Self::Money(inner) => inner.error_code(),
        }
    }
}
