//! Mock connectors for coinset.
//!
//! [`MockConnector`] serves deterministic fixtures and needs no network, which
//! makes it suitable for CI and for the CLI's offline mode. Some symbols are
//! wired to misbehave on purpose:
//!
//! - `FAIL`: history calls return a connector error.
//! - `TIMEOUT`: history calls sleep for [`MockConnector::SLOW_RESPONSE`] before answering.
//! - `ZERO`: the first price is exactly zero.
//! - `SHORT`: fewer days than the default window length.
//!
//! [`DynamicMockConnector`] defers every answer to a [`DynamicMockController`]
//! so tests can script failures and hangs per call.
use std::time::Duration;

use async_trait::async_trait;
use coinset_core::connector::{CatalogProvider, CoinsetConnector, HistoryProvider};
use coinset_core::{CatalogEntry, CoinId, CoinsetError, RawObservation, Timeframe};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, HistoryRequestLog, MockBehavior};

/// Mock connector for CI-safe runs. Provides deterministic data from static fixtures.
///
/// Fixtures ignore the requested timeframe and base currency.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Latency injected for the `TIMEOUT` fixture.
    pub const SLOW_RESPONSE: Duration = Duration::from_millis(200);

    /// Create the mock connector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(id: CoinId, capability: &'static str) -> Result<(), CoinsetError> {
        match id.get() {
            fixtures::catalog::FAIL => Err(CoinsetError::connector(
                "coinset-mock",
                format!("forced failure: {capability}"),
            )),
            fixtures::catalog::TIMEOUT => {
                tokio::time::sleep(Self::SLOW_RESPONSE).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl CoinsetConnector for MockConnector {
    fn name(&self) -> &'static str {
        "coinset-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl CatalogProvider for MockConnector {
    async fn catalog(&self) -> Result<Vec<CatalogEntry>, CoinsetError> {
        Ok(fixtures::catalog::entries())
    }
}

#[async_trait]
impl HistoryProvider for MockConnector {
    async fn history(
        &self,
        id: CoinId,
        _timeframe: Timeframe,
        _base: &str,
    ) -> Result<Vec<RawObservation>, CoinsetError> {
        Self::maybe_fail_or_timeout(id, "history").await?;
        fixtures::history::by_id(id)
            .ok_or_else(|| CoinsetError::not_found(format!("history for coin {id}")))
    }
}
