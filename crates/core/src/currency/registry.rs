//! Cached currency resolution using Moka.
//!
//! Wraps a resolver so repeated lookups of the same code share one
//! descriptor. Configuration is fixed when the registry is built.

use std::sync::Arc;
use std::time::Duration;

use apportion_shared::config::CacheConfig;
use apportion_shared::{Currency, MoneyResult};
use moka::sync::Cache;
use tracing::{debug, trace};

use super::resolver::{CurrencyResolver, IsoTable, ResolverChain};

/// Thread-safe, cached currency lookup.
#[derive(Clone)]
pub struct CurrencyRegistry {
    cache: Cache<String, Currency>,
    resolver: Arc<ResolverChain>,
}

impl CurrencyRegistry {
    /// Registry over the ISO table with default cache settings.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a registry.
    #[must_use]
    pub fn builder() -> CurrencyRegistryBuilder {
        CurrencyRegistryBuilder::default()
    }

    /// Resolves `code`, computing and caching it on a miss.
    ///
    /// Concurrent misses for the same code run the resolver once. Failures
    /// are not cached.
    pub fn resolve(&self, code: &str) -> MoneyResult<Currency> {
        let key = code.trim().to_ascii_uppercase();
        self.cache
            .try_get_with(key, || {
                trace!(code, "currency cache miss");
                self.resolver.resolve(code)
            })
            .map_err(|err| {
                debug!(code, error = %err, "currency resolution failed");
                err.as_ref().clone()
            })
    }

    /// Drops every cached entry.
    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl Default for CurrencyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CurrencyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyRegistry")
            .field("resolver", &self.resolver)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl CurrencyResolver for CurrencyRegistry {
    fn resolve(&self, code: &str) -> MoneyResult<Currency> {
        Self::resolve(self, code)
    }
}

/// Builder for [`CurrencyRegistry`]; consumed by `build`.
#[derive(Debug, Default)]
pub struct CurrencyRegistryBuilder {
    chain: ResolverChain,
    cache: CacheConfig,
}

impl CurrencyRegistryBuilder {
    /// Appends a resolver. Without any, the ISO table is used.
    #[must_use]
    pub fn resolver(mut self, resolver: impl CurrencyResolver + 'static) -> Self {
        self.chain = self.chain.with(resolver);
        self
    }

    /// Applies cache settings.
    #[must_use]
    pub fn cache_config(mut self, cache: &CacheConfig) -> Self {
        self.cache = cache.clone();
        self
    }

    /// Maximum number of cached currencies.
    #[must_use]
    pub const fn max_capacity(mut self, max_capacity: u64) -> Self {
        self.cache.max_capacity = max_capacity;
        self
    }

    /// Time-to-live in seconds for each entry.
    #[must_use]
    pub const fn ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.cache.ttl_secs = ttl_secs;
        self
    }

    /// Builds the registry.
    #[must_use]
    pub fn build(self) -> CurrencyRegistry {
        let chain = if self.chain.is_empty() {
            self.chain.with(IsoTable)
        } else {
            self.chain
        };

        let cache = Cache::builder()
            .max_capacity(self.cache.max_capacity)
            .time_to_live(Duration::from_secs(self.cache.ttl_secs))
            .build();

        CurrencyRegistry {
            cache,
            resolver: Arc::new(chain),
        }
    }
}
