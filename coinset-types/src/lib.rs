//! Coinset-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod capability;
mod coin;
mod config;
mod connector;
mod error;
mod timeframe;

pub use capability::Capability;
pub use coin::{CatalogEntry, CoinId};
pub use config::{CoinsetConfig, DEFAULT_TRAIN_FRACTION, DEFAULT_WINDOW_LEN, SplitOptions};
pub use connector::ConnectorKey;
pub use error::CoinsetError;
pub use timeframe::Timeframe;
