//! Money and currency-resolution configuration.

use serde::Deserialize;

use crate::types::{Currency, Rounding, RoundingMode};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MoneyConfig {
    /// Rounding configuration.
    #[serde(default)]
    pub rounding: RoundingConfig,
    /// Currency resolution cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Rounding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoundingConfig {
    /// Mode applied to amounts created from configuration.
    #[serde(default)]
    pub mode: RoundingMode,
    /// Precision override; the currency's minor units when absent.
    #[serde(default)]
    pub precision: Option<u32>,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            mode: RoundingMode::HalfEven,
            precision: None,
        }
    }
}

/// Currency resolution cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached descriptors.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Time-to-live per entry in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_max_capacity() -> u64 {
    1024
}

fn default_ttl_secs() -> u64 {
    3600 // 1 hour
}

impl MoneyConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("APPORTION")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Rounding policy for amounts in `currency`.
    #[must_use]
    pub fn rounding_for(&self, currency: &Currency) -> Rounding {
        let precision = self
            .rounding
            .precision
            .unwrap_or_else(|| currency.minor_units());
        Rounding::precise(precision, self.rounding.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MoneyConfig::default();
        assert_eq!(config.rounding.mode, RoundingMode::HalfEven);
        assert_eq!(config.rounding.precision, None);
        assert_eq!(config.cache.max_capacity, 1024);
        assert_eq!(config.cache.ttl_secs, 3600);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("missing")),
                ("APPORTION__ROUNDING__MODE", None::<&str>),
                ("APPORTION__CACHE__MAX_CAPACITY", None),
            ],
            || {
                let config = MoneyConfig::load().unwrap();
                assert_eq!(config, MoneyConfig::default());
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("RUN_MODE", Some("missing")),
                ("APPORTION__ROUNDING__MODE", Some("HALF_UP")),
                ("APPORTION__CACHE__MAX_CAPACITY", Some("16")),
            ],
            || {
                let config = MoneyConfig::load().unwrap();
                assert_eq!(config.rounding.mode, RoundingMode::HalfUp);
                assert_eq!(config.cache.max_capacity, 16);
                assert_eq!(config.cache.ttl_secs, 3600);
            },
        );
    }

    #[test]
    fn test_rounding_for_currency() {
        let jpy = Currency::fiat("JPY", 0).unwrap();
        let mut config = MoneyConfig::default();
        assert_eq!(
            config.rounding_for(&jpy),
            Rounding::precise(0, RoundingMode::HalfEven)
        );

        config.rounding.precision = Some(4);
        config.rounding.mode = RoundingMode::Down;
        assert_eq!(
            config.rounding_for(&jpy),
            Rounding::precise(4, RoundingMode::Down)
        );
    }
}
