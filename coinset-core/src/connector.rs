use async_trait::async_trait;

use crate::CoinsetError;
use crate::types::RawObservation;
pub use coinset_types::ConnectorKey;
use coinset_types::{CatalogEntry, CoinId, Timeframe};

/// Focused role trait for connectors that list the provider's instrument catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch every `(symbol, id)` pair the provider currently lists, in the
    /// provider's own order.
    async fn catalog(&self) -> Result<Vec<CatalogEntry>, CoinsetError>;
}

/// Focused role trait for connectors that serve price history.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch raw `(timestamp, price)` observations for the given coin.
    ///
    /// Parameters:
    /// - `id`: provider identifier resolved through the registry.
    /// - `timeframe`: historical span to request.
    /// - `base`: currency code prices are denominated in.
    ///
    /// Observations may arrive in any order and may contain several points
    /// for the same calendar day.
    async fn history(
        &self,
        id: CoinId,
        timeframe: Timeframe,
        base: &str,
    ) -> Result<Vec<RawObservation>, CoinsetError>;
}

/// Primary connector interface. Capabilities are advertised through the
/// `as_*_provider` accessors so a connector only implements what its
/// provider actually offers.
pub trait CoinsetConnector: Send + Sync {
    /// A stable identifier used to tag errors and logs (e.g. "coinset-coinranking").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise catalog capability by returning a usable trait object reference when supported.
    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        None
    }

    /// Advertise history capability by returning a usable trait object reference when supported.
    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        None
    }
}
