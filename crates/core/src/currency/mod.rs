//! Currency resolution.

pub mod registry;
pub mod resolver;

pub use registry::{CurrencyRegistry, CurrencyRegistryBuilder};
pub use resolver::{CurrencyResolver, CustomTable, IsoTable, ResolverChain};
