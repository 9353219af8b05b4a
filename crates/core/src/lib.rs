//! Core allocation logic for Apportion.
//!
//! Pure computation with no I/O: splitting money into even or proportional
//! shares that sum back to the original amount, plus cached currency
//! resolution.
//!
//! # Modules
//!
//! - `allocation` - Requests, difference policies, allocator and results
//! - `currency` - Currency lookup and caching

pub mod allocation;
pub mod currency;

pub use allocation::{
    Allocate, Allocation, AllocationError, AllocationRequest, Allocator, DifferenceAllocation,
};
pub use currency::{CurrencyRegistry, CurrencyResolver};
