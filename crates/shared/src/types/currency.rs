//! Currency identity and descriptor.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{MoneyError, MoneyResult};

/// Largest scale a `Decimal` can carry.
const MAX_MINOR_UNITS: u32 = 28;

/// Classification of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyKind {
    /// National or regional legal tender.
    Fiat,
    /// Precious metal (XAU, XAG, ...).
    Metal,
    /// Fund or unit of account (CLF, XDR, ...).
    Fund,
    /// Crypto asset.
    Crypto,
    /// Application-defined currency.
    Custom,
}

/// Reference data describing a currency.
///
/// Only constructible through [`CurrencyDescriptor::new`]; deserialization
/// runs the same validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct CurrencyDescriptor {
    code: String,
    secondary_code: Option<String>,
    name: String,
    symbol: String,
    kind: CurrencyKind,
    minor_units: u32,
}

/// Unvalidated wire form of a descriptor.
#[derive(Deserialize)]
struct RawDescriptor {
    code: String,
    #[serde(default)]
    secondary_code: Option<String>,
    name: String,
    symbol: String,
    kind: CurrencyKind,
    minor_units: i64,
}

impl TryFrom<RawDescriptor> for CurrencyDescriptor {
    type Error = MoneyError;

    fn try_from(raw: RawDescriptor) -> MoneyResult<Self> {
        let minor_units = i32::try_from(raw.minor_units).map_err(|_| {
            MoneyError::InvalidCurrency(format!(
                "{}: minor units out of range, got {}",
                raw.code, raw.minor_units
            ))
        })?;
        Self::new(
            raw.code,
            raw.secondary_code,
            raw.name,
            raw.symbol,
            raw.kind,
            minor_units,
        )
    }
}

impl CurrencyDescriptor {
    /// Creates a validated descriptor.
    ///
    /// Fails when the code is blank or `minor_units` is negative or exceeds
    /// the decimal scale limit.
    pub fn new(
        code: impl Into<String>,
        secondary_code: Option<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        kind: CurrencyKind,
        minor_units: i32,
    ) -> MoneyResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(MoneyError::InvalidCurrency("code must not be empty".into()));
        }
        let minor_units = u32::try_from(minor_units).map_err(|_| {
            MoneyError::InvalidCurrency(format!(
                "{code}: minor units must not be negative, got {minor_units}"
            ))
        })?;
        if minor_units > MAX_MINOR_UNITS {
            return Err(MoneyError::InvalidCurrency(format!(
                "{code}: at most {MAX_MINOR_UNITS} minor units are supported, got {minor_units}"
            )));
        }

        Ok(Self {
            code,
            secondary_code,
            name: name.into(),
            symbol: symbol.into(),
            kind,
            minor_units,
        })
    }

    /// Primary (ISO 4217 alphabetic) code, e.g. "USD".
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Secondary (ISO 4217 numeric) code, e.g. "840".
    #[must_use]
    pub fn secondary_code(&self) -> Option<&str> {
        self.secondary_code.as_deref()
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Classification.
    #[must_use]
    pub const fn kind(&self) -> CurrencyKind {
        self.kind
    }

    /// Number of decimal places of the minor unit.
    #[must_use]
    pub const fn minor_units(&self) -> u32 {
        self.minor_units
    }
}

/// Shared handle to a currency descriptor.
///
/// Identity is the `(code, minor_units)` pair; the remaining descriptor
/// fields are informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(Arc<CurrencyDescriptor>);

impl Currency {
    /// Wraps a descriptor.
    #[must_use]
    pub fn new(descriptor: CurrencyDescriptor) -> Self {
        Self(Arc::new(descriptor))
    }

    /// Shorthand for a fiat currency with no secondary code.
    pub fn fiat(code: &str, minor_units: i32) -> MoneyResult<Self> {
        CurrencyDescriptor::new(code, None, code, code, CurrencyKind::Fiat, minor_units)
            .map(Self::new)
    }

    /// Primary code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0.code
    }

    /// Number of decimal places of the minor unit.
    #[must_use]
    pub fn minor_units(&self) -> u32 {
        self.0.minor_units
    }

    /// Full descriptor.
    #[must_use]
    pub fn descriptor(&self) -> &CurrencyDescriptor {
        &self.0
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code() && self.minor_units() == other.minor_units()
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
        self.minor_units().hash(state);
    }
}

impl PartialOrd for Currency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Currency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code()
            .cmp(other.code())
            .then_with(|| self.minor_units().cmp(&other.minor_units()))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
