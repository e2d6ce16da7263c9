//! Provider-side instrument identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Provider-specific numeric identifier of a coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoinId(pub u64);

impl CoinId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CoinId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// One `(symbol, id)` pair from the provider's instrument catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Ticker symbol as listed by the provider (e.g. "BTC").
    pub symbol: String,
    /// Provider identifier for the symbol.
    pub id: CoinId,
}

impl CatalogEntry {
    /// Convenience constructor.
    pub fn new(symbol: impl Into<String>, id: impl Into<CoinId>) -> Self {
        Self {
            symbol: symbol.into(),
            id: id.into(),
        }
    }
}
