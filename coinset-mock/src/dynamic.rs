use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use coinset_core::connector::{CatalogProvider, CoinsetConnector, HistoryProvider};
use coinset_core::{CatalogEntry, CoinId, CoinsetError, RawObservation, Timeframe};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(CoinsetError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

/// One recorded `history` call: the timeframe and base it asked for.
pub type HistoryRequestLog = Vec<(Timeframe, String)>;

#[derive(Default)]
struct InternalState {
    catalog_rule: Option<MockBehavior<Vec<CatalogEntry>>>,
    history_rules: HashMap<CoinId, MockBehavior<Vec<RawObservation>>>,
    catalog_calls: usize,
    history_requests: HashMap<CoinId, HistoryRequestLog>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `catalog` calls.
    pub async fn set_catalog_behavior(&self, behavior: MockBehavior<Vec<CatalogEntry>>) {
        let mut guard = self.state.lock().await;
        guard.catalog_rule = Some(behavior);
    }

    /// Set the behavior for `history` calls for a specific coin.
    pub async fn set_history_behavior(
        &self,
        id: CoinId,
        behavior: MockBehavior<Vec<RawObservation>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.history_rules.insert(id, behavior);
    }

    /// Number of `catalog` calls seen so far, including failed ones.
    pub async fn catalog_calls(&self) -> usize {
        self.state.lock().await.catalog_calls
    }

    /// Number of `history` calls seen so far for `id`.
    pub async fn history_calls(&self, id: CoinId) -> usize {
        self.state
            .lock()
            .await
            .history_requests
            .get(&id)
            .map_or(0, Vec::len)
    }

    /// Return a copy of the request log for `id`, oldest first.
    pub async fn history_requests(&self, id: CoinId) -> HistoryRequestLog {
        let guard = self.state.lock().await;
        guard.history_requests.get(&id).cloned().unwrap_or_default()
    }

    /// Clear all configured behaviors and call logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
    }
}

/// A connector that defers all behavior to an external controller.
///
/// Calls with no configured behavior fail with `CoinsetError::Unsupported`.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn CoinsetConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn CoinsetConnector>, controller)
    }
}

impl CoinsetConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }

    fn as_history_provider(&self) -> Option<&dyn HistoryProvider> {
        Some(self as &dyn HistoryProvider)
    }
}

#[async_trait]
impl CatalogProvider for DynamicMockConnector {
    async fn catalog(&self) -> Result<Vec<CatalogEntry>, CoinsetError> {
        // Take the behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.catalog_calls += 1;
            guard.catalog_rule.clone()
        };

        match behavior {
            Some(MockBehavior::Return(entries)) => Ok(entries),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(CoinsetError::unsupported("catalog")),
        }
    }
}

#[async_trait]
impl HistoryProvider for DynamicMockConnector {
    async fn history(
        &self,
        id: CoinId,
        timeframe: Timeframe,
        base: &str,
    ) -> Result<Vec<RawObservation>, CoinsetError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard
                .history_requests
                .entry(id)
                .or_default()
                .push((timeframe, base.to_string()));
            guard.history_rules.get(&id).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(rows)) => Ok(rows),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(CoinsetError::unsupported("history")),
        }
    }
}
