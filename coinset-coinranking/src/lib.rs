//! coinset-coinranking
//!
//! Public connector that implements `CoinsetConnector` on top of the
//! Coinranking v1 public REST API. Exposes the coin catalog and per-coin
//! price history.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// Serde models of the API responses.
pub mod wire;

use std::sync::Arc;

use adapter::{CONNECTOR_NAME, CrCatalog, CrHistory, RealAdapter};
use async_trait::async_trait;
use coinset_core::{
    CatalogEntry, CoinId, CoinsetError, RawObservation, Timeframe,
    connector::{CatalogProvider, CoinsetConnector, ConnectorKey, HistoryProvider},
};

/// Public connector type. Production users will construct with
/// `CoinrankingConnector::try_new_default()`.
pub struct CoinrankingConnector {
    catalog: Arc<dyn CrCatalog>,
    history: Arc<dyn CrHistory>,
}

impl CoinrankingConnector {
    /// Static connector key.
    pub const KEY: ConnectorKey = ConnectorKey::new(CONNECTOR_NAME);

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("not_found") || m.contains("no data")
    }

    fn normalize_error(e: CoinsetError, what: &str) -> CoinsetError {
        match e {
            CoinsetError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    CoinsetError::not_found(what.to_string())
                } else {
                    CoinsetError::connector(CONNECTOR_NAME, msg)
                }
            }
            CoinsetError::Other(msg) => CoinsetError::connector(CONNECTOR_NAME, msg),
            other => other,
        }
    }

    /// Build against the public API with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, CoinsetError> {
        Ok(Self::from_adapter(RealAdapter::try_new_default()?))
    }

    /// Build against an alternative API root, e.g. a local mock server.
    ///
    /// # Errors
    /// Returns `CoinsetError::InvalidArg` for a malformed URL, or an error if
    /// the HTTP client cannot be constructed.
    pub fn try_with_base_url(base_url: &str) -> Result<Self, CoinsetError> {
        Ok(Self::from_adapter(RealAdapter::try_with_base_url(base_url)?))
    }

    /// Build from a concrete `RealAdapter` shared by both capabilities.
    #[must_use]
    pub fn from_adapter(adapter: RealAdapter) -> Self {
        let shared = Arc::new(adapter);
        Self {
            catalog: Arc::clone(&shared) as Arc<dyn CrCatalog>,
            history: shared,
        }
    }

    /// For tests/injection: build from independent adapters.
    #[must_use]
    pub fn from_adapters(catalog: Arc<dyn CrCatalog>, history: Arc<dyn CrHistory>) -> Self {
        Self { catalog, history }
    }
}

impl CoinsetConnector for CoinrankingConnector {
    fn name(&self) -> &'static str {
        CONNECTOR_NAME
    }

    fn vendor(&self) -> &'static str {
        "Coinranking"
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl CatalogProvider for CoinrankingConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "coinset_coinranking::catalog", skip(self))
    )]
    async fn catalog(&self) -> Result<Vec<CatalogEntry>, CoinsetError> {
        let coins = self
            .catalog
            .coins()
            .await
            .map_err(|e| Self::normalize_error(e, "coin catalog"))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(coins = coins.len(), "catalog fetched");
        Ok(coins
            .into_iter()
            .map(|c| CatalogEntry::new(c.symbol, c.id))
            .collect())
    }
}

#[async_trait]
impl HistoryProvider for CoinrankingConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "coinset_coinranking::history",
            skip_all,
            fields(id = %id, timeframe = %timeframe, base = %base),
        )
    )]
    async fn history(
        &self,
        id: CoinId,
        timeframe: Timeframe,
        base: &str,
    ) -> Result<Vec<RawObservation>, CoinsetError> {
        let points = self
            .history
            .history(id, timeframe, base)
            .await
            .map_err(|e| Self::normalize_error(e, &format!("history for coin {id}")))?;
        #[cfg(feature = "tracing")]
        let nulls = points.iter().filter(|p| p.price.is_none()).count();
        // Points with a null price carry no information for the series
        let rows: Vec<RawObservation> = points
            .into_iter()
            .filter_map(|p| p.price.map(|price| RawObservation::new(p.timestamp, price)))
            .collect();
        #[cfg(feature = "tracing")]
        if nulls > 0 {
            tracing::debug!(dropped = nulls, "skipped null-price points");
        }
        Ok(rows)
    }
}
