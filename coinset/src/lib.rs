//! Coinset turns a provider's daily price history into supervised-learning
//! datasets.
//!
//! Overview
//! - Resolves ticker symbols to provider identifiers through a shared,
//!   atomically refreshed [`IdentifierRegistry`].
//! - Fetches history through a single connector implementing the
//!   `coinset_core` contracts, bounded by a per-call timeout.
//! - Collapses intraday points into one mean price per UTC day, slices the
//!   series into overlapping windows of length L, rebases each window to
//!   relative change, and splits the result chronologically into train and
//!   test sets.
//!
//! Lifecycle
//! - [`Coinset::load`] returns an immutable [`Instrument`] snapshot. Validation
//!   errors (empty base, unknown symbol) come back as `Err`; provider or data
//!   failures come back as an instrument in the `Failed` state.
//! - [`Coinset::with_timeframe`], [`Coinset::with_base`] and
//!   [`Coinset::with_symbol`] produce new snapshots; the old one is untouched.
//!   A failed re-derivation keeps the previous data reachable through
//!   [`Instrument::last_good`].
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use coinset::{Coinset, Timeframe};
//! use coinset_coinranking::CoinrankingConnector;
//!
//! let cr = Arc::new(CoinrankingConnector::try_new_default()?);
//! let coinset = Coinset::builder().with_connector(cr).build()?;
//!
//! let btc = coinset.load("BTC", Timeframe::Y1, "USD").await?;
//! let eur = coinset.with_base(&btc, "EUR").await?;
//! let ds = coinset.dataset(&eur)?;
//! let ((n_train, steps, _), _) = ds.feature_shape();
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod instrument;

pub use core::{Coinset, CoinsetBuilder};
pub use instrument::{DerivedData, Instrument, InstrumentState, InstrumentStats};

// Re-export core types for convenience
pub use coinset_core::{
    CatalogEntry, CoinId, CoinsetConfig, CoinsetConnector, CoinsetError, Dataset,
    IdentifierRegistry, NormalizedWindow, PriceObservation, PriceSeries, SplitOptions,
    Timeframe, Window,
};
