//! Foundational value types shared by connectors and the pipeline.
// Consolidated re-exports so downstream crates can depend on `coinset-core` only

use serde::{Deserialize, Serialize};

pub use coinset_types::{
    Capability, CatalogEntry, CoinId, CoinsetConfig, CoinsetError, ConnectorKey,
    DEFAULT_TRAIN_FRACTION, DEFAULT_WINDOW_LEN, SplitOptions, Timeframe,
};
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;

/// A single provider observation, before any cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    /// Observation time in epoch milliseconds (UTC).
    pub timestamp_ms: i64,
    /// Observed price in the requested base currency.
    pub price: Decimal,
}

impl RawObservation {
    /// Convenience constructor.
    #[must_use]
    pub const fn new(timestamp_ms: i64, price: Decimal) -> Self {
        Self {
            timestamp_ms,
            price,
        }
    }
}

/// One cleaned daily observation: at most one per calendar date in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PriceObservation {
    /// UTC calendar date.
    pub date: NaiveDate,
    /// Non-negative price; the mean of every raw observation on `date`.
    pub price: Decimal,
}
