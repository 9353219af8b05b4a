//! Value-conserving allocation of money.
//!
//! Splits an amount into even parts or by percentage ratios, then
//! reconciles the rounding difference so the shares sum back to the
//! original amount (unless the policy is `Discard`).
//!
//! ```
//! use apportion_core::allocation::{Allocate, AllocationRequest};
//! use apportion_shared::{Currency, Money};
//! use rust_decimal_macros::dec;
//!
//! let usd = Currency::fiat("USD", 2).unwrap();
//! let allocation = Money::of(dec!(100), usd)
//!     .allocate(&AllocationRequest::even(3).unwrap())
//!     .unwrap();
//! let shares: Vec<_> = allocation.allocations().iter().map(|m| m.amount()).collect();
//! assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
//! ```

pub mod allocator;
pub mod difference;
pub mod error;
pub mod request;
pub mod result;

#[cfg(test)]
mod props;

pub use allocator::{Allocate, Allocator};
pub use difference::{DifferenceAllocation, Position, ValueTarget};
pub use error::AllocationError;
pub use request::{AllocationRequest, EvenParts, RATIO_TOLERANCE, Ratios};
pub use result::{Allocation, Details};
