//! Currency lookup by code.

use std::collections::HashMap;

use apportion_shared::{Currency, CurrencyDescriptor, CurrencyKind, MoneyError, MoneyResult};

/// Resolves a currency code to a `Currency`.
pub trait CurrencyResolver: Send + Sync {
    /// Returns the currency for `code`, or `UnknownCurrency`.
    fn resolve(&self, code: &str) -> MoneyResult<Currency>;
}

/// (code, numeric code, name, symbol, kind, minor units)
type IsoEntry = (&'static str, &'static str, &'static str, &'static str, CurrencyKind, i32);

/// Metals carry no ISO minor unit and are tracked in whole units.
const ISO_CURRENCIES: &[IsoEntry] = &[
    ("USD", "840", "US Dollar", "$", CurrencyKind::Fiat, 2),
    ("EUR", "978", "Euro", "€", CurrencyKind::Fiat, 2),
    ("GBP", "826", "Pound Sterling", "£", CurrencyKind::Fiat, 2),
    ("JPY", "392", "Yen", "¥", CurrencyKind::Fiat, 0),
    ("BRL", "986", "Brazilian Real", "R$", CurrencyKind::Fiat, 2),
    ("IDR", "360", "Rupiah", "Rp", CurrencyKind::Fiat, 2),
    ("SGD", "702", "Singapore Dollar", "S$", CurrencyKind::Fiat, 2),
    ("CHF", "756", "Swiss Franc", "CHF", CurrencyKind::Fiat, 2),
    ("KWD", "414", "Kuwaiti Dinar", "KD", CurrencyKind::Fiat, 3),
    ("BHD", "048", "Bahraini Dinar", "BD", CurrencyKind::Fiat, 3),
    ("CLF", "990", "Unidad de Fomento", "UF", CurrencyKind::Fund, 4),
    ("XAU", "959", "Gold", "XAU", CurrencyKind::Metal, 0),
];

/// Built-in table of common ISO 4217 currencies.
///
/// Matches the alphabetic or numeric code, ignoring ASCII case and
/// surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoTable;

impl IsoTable {
    /// Alphabetic codes known to the table.
    pub fn codes() -> impl Iterator<Item = &'static str> {
        ISO_CURRENCIES.iter().map(|entry| entry.0)
    }
}

impl CurrencyResolver for IsoTable {
    fn resolve(&self, code: &str) -> MoneyResult<Currency> {
        let code = code.trim();
        let &(alpha, numeric, name, symbol, kind, minor_units) = ISO_CURRENCIES
            .iter()
            .find(|entry| entry.0.eq_ignore_ascii_case(code) || entry.1 == code)
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))?;

        CurrencyDescriptor::new(
            alpha,
            Some(numeric.to_string()),
            name,
            symbol,
            kind,
            minor_units,
        )
        .map(Currency::new)
    }
}

/// Application-defined currencies, keyed by upper-cased primary code.
#[derive(Debug, Clone, Default)]
pub struct CustomTable {
    currencies: HashMap<String, Currency>,
}

impl CustomTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a currency, replacing any entry with the same code.
    #[must_use]
    pub fn with(mut self, currency: Currency) -> Self {
        self.currencies
            .insert(currency.code().to_ascii_uppercase(), currency);
        self
    }

    /// Number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl CurrencyResolver for CustomTable {
    fn resolve(&self, code: &str) -> MoneyResult<Currency> {
        let code = code.trim();
        self.currencies
            .get(&code.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
    }
}

/// Ordered resolvers; the first hit wins.
#[derive(Default)]
pub struct ResolverChain {
    resolvers: Vec<Box<dyn CurrencyResolver>>,
}

impl ResolverChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a resolver.
    #[must_use]
    pub fn with(mut self, resolver: impl CurrencyResolver + 'static) -> Self {
        self.resolvers.push(Box::new(resolver));
        self
    }

    /// Number of resolvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Whether the chain has no resolvers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl std::fmt::Debug for ResolverChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverChain")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

impl CurrencyResolver for ResolverChain {
    /// Non-`UnknownCurrency` errors stop the chain.
    fn resolve(&self, code: &str) -> MoneyResult<Currency> {
        for resolver in &self.resolvers {
            match resolver.resolve(code) {
                Err(MoneyError::UnknownCurrency(_)) => {}
                result => return result,
            }
        }
        Err(MoneyError::UnknownCurrency(code.trim().to_string()))
    }
}
