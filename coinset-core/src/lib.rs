//! coinset-core
//!
//! Core types, traits, and pipeline stages shared across the coinset workspace.
//!
//! - `types`: raw and cleaned observations plus re-exports from `coinset-types`.
//! - `connector`: the `CoinsetConnector` trait and its capability traits.
//! - `registry`: the shared symbol → provider identifier registry.
//! - `timeseries`: series building, windowing, normalization, and splitting.
//!
//! Every stage returns an explicit `Result`; nothing in this crate logs and
//! swallows a failure. Enable the `tracing` feature to get spans and events
//! around registry refreshes.
#![warn(missing_docs)]

/// Connector capability traits and the primary `CoinsetConnector` interface.
pub mod connector;
/// Shared identifier registry.
pub mod registry;
/// Pipeline stages from raw observations to a dataset.
pub mod timeseries;
pub mod types;

pub use connector::{CatalogProvider, CoinsetConnector, HistoryProvider};
pub use registry::{IdentifierRegistry, canonical_symbol};
pub use timeseries::normalize::{NormalizedWindow, normalize, normalize_all};
pub use timeseries::series::PriceSeries;
pub use timeseries::split::{Dataset, FeatureShape, split, split_row, split_with_rng};
pub use timeseries::window::{Window, build_windows};
pub use types::*;
