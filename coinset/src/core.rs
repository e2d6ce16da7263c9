use std::sync::Arc;
use std::time::Duration;

use coinset_core::{
    Capability, CoinsetConfig, CoinsetConnector, CoinsetError, Dataset, IdentifierRegistry,
    PriceSeries, Timeframe, build_windows, canonical_symbol, normalize_all,
};

use crate::instrument::{DerivedData, Instrument};

/// Orchestrator that resolves symbols, fetches history, and derives datasets.
pub struct Coinset {
    pub(crate) connector: Arc<dyn CoinsetConnector>,
    pub(crate) registry: Arc<IdentifierRegistry>,
    pub(crate) cfg: CoinsetConfig,
}

/// Builder for constructing a `Coinset` orchestrator with custom configuration.
pub struct CoinsetBuilder {
    connector: Option<Arc<dyn CoinsetConnector>>,
    registry: Option<Arc<IdentifierRegistry>>,
    cfg: CoinsetConfig,
}

impl Default for CoinsetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinsetBuilder {
    /// Create a new builder with defaults: windows of 30 days, a 0.9 train
    /// fraction without shuffling, a 10s provider timeout, and `USD` as base.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connector: None,
            registry: None,
            cfg: CoinsetConfig::default(),
        }
    }

    /// Register the provider connector. A later call replaces an earlier one.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn CoinsetConnector>) -> Self {
        self.connector = Some(c);
        self
    }

    /// Share an existing identifier registry instead of creating a seeded one.
    ///
    /// Several orchestrators pointed at the same provider can share one
    /// registry so a single catalog refresh serves all of them.
    #[must_use]
    pub fn registry(mut self, registry: Arc<IdentifierRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: CoinsetConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the window length L.
    #[must_use]
    pub const fn window_len(mut self, len: usize) -> Self {
        self.cfg.window_len = len;
        self
    }

    /// Set the fraction of windows assigned to the training set.
    #[must_use]
    pub const fn train_fraction(mut self, fraction: f64) -> Self {
        self.cfg.split.train_fraction = fraction;
        self
    }

    /// Toggle shuffling of the training windows. The test set is never shuffled.
    #[must_use]
    pub const fn shuffle_train(mut self, yes: bool) -> Self {
        self.cfg.split.shuffle_train = yes;
        self
    }

    /// Set the per-call provider timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set the base currency used by [`Coinset::load_symbol`].
    #[must_use]
    pub fn default_base(mut self, base: impl Into<String>) -> Self {
        self.cfg.default_base = base.into();
        self
    }

    /// Toggle the catalog refresh before the first load.
    #[must_use]
    pub const fn refresh_registry_on_first_load(mut self, yes: bool) -> Self {
        self.cfg.refresh_registry_on_first_load = yes;
        self
    }

    /// Build the `Coinset` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector was registered or the configuration
    /// is invalid, and `Unsupported` if the connector cannot serve history.
    pub fn build(self) -> Result<Coinset, CoinsetError> {
        let Some(connector) = self.connector else {
            return Err(CoinsetError::InvalidArg(
                "no connector registered; add one via with_connector(...)".to_string(),
            ));
        };
        if connector.as_history_provider().is_none() {
            return Err(CoinsetError::unsupported(Capability::History.as_str()));
        }
        self.cfg.validate()?;

        Ok(Coinset {
            connector,
            registry: self
                .registry
                .unwrap_or_else(|| Arc::new(IdentifierRegistry::new())),
            cfg: self.cfg,
        })
    }
}

/// Re-tag errors that did not come from the transport layer with the connector name.
pub(crate) fn tag_err(connector: &str, e: CoinsetError) -> CoinsetError {
    match e {
        e @ (CoinsetError::NotFound { .. }
        | CoinsetError::ProviderTimeout { .. }
        | CoinsetError::Connector { .. }
        | CoinsetError::Parse(_)
        | CoinsetError::Unsupported { .. }) => e,
        other => CoinsetError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

fn canonical_base(base: &str) -> Result<String, CoinsetError> {
    let b = base.trim();
    if b.is_empty() {
        return Err(CoinsetError::InvalidArg(
            "base currency must not be empty".into(),
        ));
    }
    Ok(b.to_ascii_uppercase())
}

impl Coinset {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "coinset::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, CoinsetError>
    where
        Fut: core::future::Future<Output = Result<T, CoinsetError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(CoinsetError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `Coinset` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use coinset::{Coinset, Timeframe};
    /// use coinset_mock::MockConnector;
    ///
    /// let coinset = Coinset::builder()
    ///     .with_connector(Arc::new(MockConnector::new()))
    ///     .window_len(30)
    ///     .build()?;
    /// let btc = coinset.load("BTC", Timeframe::D30, "USD").await?;
    /// let ds = coinset.dataset(&btc)?;
    /// ```
    #[must_use]
    pub fn builder() -> CoinsetBuilder {
        CoinsetBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CoinsetConfig {
        &self.cfg
    }

    /// Shared identifier registry.
    #[must_use]
    pub const fn registry(&self) -> &Arc<IdentifierRegistry> {
        &self.registry
    }

    /// Name of the registered connector.
    #[must_use]
    pub fn connector_name(&self) -> &'static str {
        self.connector.name()
    }

    /// Replace the registry mapping with the provider's current catalog.
    ///
    /// Returns the number of symbols now known.
    ///
    /// # Errors
    /// Returns `Unsupported` if the connector has no catalog, `ProviderTimeout`
    /// if the call exceeds the provider timeout, or the provider's error. The
    /// previous mapping is kept on any error.
    pub async fn refresh_registry(&self) -> Result<usize, CoinsetError> {
        let name = self.connector.name();
        let capability = Capability::Catalog.as_str();
        let cp = self
            .connector
            .as_catalog_provider()
            .ok_or_else(|| CoinsetError::unsupported(capability))?;
        Self::provider_call_with_timeout(
            name,
            capability,
            self.cfg.provider_timeout,
            self.registry.refresh(cp),
        )
        .await
        .map_err(|e| tag_err(name, e))
    }

    async fn ensure_registry(&self) {
        if !self.cfg.refresh_registry_on_first_load || self.registry.generation() > 0 {
            return;
        }
        let name = self.connector.name();
        let capability = Capability::Catalog.as_str();
        let Some(cp) = self.connector.as_catalog_provider() else {
            return;
        };
        let refreshed = Self::provider_call_with_timeout(
            name,
            capability,
            self.cfg.provider_timeout,
            self.registry.refresh_if_unrefreshed(cp),
        )
        .await;
        // The seed keeps resolving the built-in symbols when the catalog is unreachable
        if let Err(_e) = refreshed.map_err(|e| tag_err(name, e)) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_e, "initial registry refresh failed; using seed entries");
        }
    }

    /// Resolve `symbol`, fetch its history, and derive windows.
    ///
    /// Validation failures are returned as `Err` before any history call.
    /// Anything that goes wrong afterwards (network, timeout, malformed data)
    /// yields `Ok` with an instrument in the `Failed` state carrying the cause.
    ///
    /// # Errors
    /// `InvalidArg` for an empty symbol or base, `UnknownInstrument` when the
    /// registry does not know the symbol.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "coinset::load",
            skip(self),
            fields(connector = self.connector.name()),
        )
    )]
    pub async fn load(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        base: &str,
    ) -> Result<Instrument, CoinsetError> {
        let symbol = canonical_symbol(symbol);
        if symbol.is_empty() {
            return Err(CoinsetError::InvalidArg("symbol must not be empty".into()));
        }
        let base = canonical_base(base)?;

        self.ensure_registry().await;
        let id = self.registry.resolve(&symbol)?;

        let inst = Instrument::resolved(symbol, id, timeframe, base);
        Ok(self.derive(inst).await)
    }

    /// [`Coinset::load`] with the default timeframe and the configured default base.
    ///
    /// # Errors
    /// Same as [`Coinset::load`].
    pub async fn load_symbol(&self, symbol: &str) -> Result<Instrument, CoinsetError> {
        self.load(symbol, Timeframe::default(), &self.cfg.default_base)
            .await
    }

    /// New snapshot of `inst` for another timeframe, re-derived without
    /// re-resolving the symbol.
    pub async fn with_timeframe(&self, inst: &Instrument, timeframe: Timeframe) -> Instrument {
        let stale = inst.stale_with(timeframe, inst.base().to_string());
        self.derive(stale).await
    }

    /// New snapshot of `inst` in another base currency.
    ///
    /// # Errors
    /// `InvalidArg` if `base` is empty after trimming.
    pub async fn with_base(&self, inst: &Instrument, base: &str) -> Result<Instrument, CoinsetError> {
        let stale = inst.stale_with(inst.timeframe(), canonical_base(base)?);
        Ok(self.derive(stale).await)
    }

    /// New snapshot for another symbol, keeping timeframe and base.
    ///
    /// # Errors
    /// Same validation as [`Coinset::load`].
    pub async fn with_symbol(
        &self,
        inst: &Instrument,
        symbol: &str,
    ) -> Result<Instrument, CoinsetError> {
        self.load(symbol, inst.timeframe(), inst.base()).await
    }

    /// Re-fetch and re-derive `inst` with unchanged parameters.
    pub async fn reload(&self, inst: &Instrument) -> Instrument {
        let stale = inst.stale_with(inst.timeframe(), inst.base().to_string());
        self.derive(stale).await
    }

    /// Split the loaded windows of `inst` using the configured split options.
    ///
    /// # Errors
    /// `NotLoaded` unless `inst` is `Loaded`.
    pub fn dataset(&self, inst: &Instrument) -> Result<Dataset, CoinsetError> {
        inst.dataset(self.cfg.split)
    }

    async fn derive(&self, inst: Instrument) -> Instrument {
        match self.fetch_and_derive(&inst).await {
            Ok(data) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    symbol = inst.symbol(),
                    series = data.series().len(),
                    windows = data.windows().len(),
                    "instrument derived"
                );
                inst.into_loaded(data)
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(symbol = inst.symbol(), error = %e, "instrument derivation failed");
                inst.into_failed(e)
            }
        }
    }

    async fn fetch_and_derive(&self, inst: &Instrument) -> Result<DerivedData, CoinsetError> {
        let name = self.connector.name();
        let capability = Capability::History.as_str();
        let hp = self
            .connector
            .as_history_provider()
            .ok_or_else(|| CoinsetError::unsupported(capability))?;

        let raw = Self::provider_call_with_timeout(
            name,
            capability,
            self.cfg.provider_timeout,
            hp.history(inst.id(), inst.timeframe(), inst.base()),
        )
        .await
        .map_err(|e| tag_err(name, e))?;

        let series = PriceSeries::from_raw(raw)?;
        let windows = build_windows(&series, self.cfg.window_len);
        let normalized = normalize_all(&windows);
        Ok(DerivedData::new(
            inst.timeframe(),
            inst.base().to_string(),
            series,
            windows,
            normalized,
        ))
    }
}
