use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use coinset_core::{CoinId, CoinsetError, Timeframe};

use crate::wire::{CoinsData, Envelope, HistoryData, WireCoin, WirePoint};

pub(crate) const CONNECTOR_NAME: &str = "coinset-coinranking";

/// Catalog abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait CrCatalog: Send + Sync {
    /// Fetch the listed coins in provider order.
    async fn coins(&self) -> Result<Vec<WireCoin>, CoinsetError>;
}

/// History abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait CrHistory: Send + Sync {
    /// Fetch raw history points for coin `id`.
    async fn history(
        &self,
        id: CoinId,
        timeframe: Timeframe,
        base: &str,
    ) -> Result<Vec<WirePoint>, CoinsetError>;
}

/// Real adapter backed by a `reqwest::Client` and the API root URL.
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base_url: Url,
}

impl RealAdapter {
    /// Public v1 API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.coinranking.com/v1/public/";

    /// Per-request timeout applied by [`RealAdapter::try_new_default`].
    pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

    /// Build a client against the public API.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, CoinsetError> {
        Self::try_with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Build a client against an alternative API root (a mirror or a local mock server).
    ///
    /// # Errors
    /// Returns `CoinsetError::InvalidArg` if `base_url` is not an absolute URL,
    /// or an error if the HTTP client cannot be constructed.
    pub fn try_with_base_url(base_url: &str) -> Result<Self, CoinsetError> {
        let http = reqwest::Client::builder()
            .timeout(Self::DEFAULT_HTTP_TIMEOUT)
            .user_agent(concat!("coinset/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoinsetError::Other(e.to_string()))?;
        Ok(Self::new(http, parse_base_url(base_url)?))
    }

    /// Wrap an existing client.
    #[must_use]
    pub fn new(http: reqwest::Client, mut base_url: Url) -> Self {
        // `Url::join` drops the last path segment unless it ends with a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    /// API root every request is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, CoinsetError> {
        self.base_url
            .join(path)
            .map_err(|e| CoinsetError::InvalidArg(format!("bad endpoint path {path}: {e}")))
    }

    async fn get_data<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, CoinsetError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_http_err(&e, context))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| map_http_err(&e, context))?;

        if status == StatusCode::NOT_FOUND {
            return Err(CoinsetError::not_found(context.to_string()));
        }
        let envelope: Envelope<T> = match serde_json::from_str(&body) {
            Ok(env) => env,
            Err(_) if !status.is_success() => {
                return Err(CoinsetError::connector(
                    CONNECTOR_NAME,
                    format!("status {status}: {context}"),
                ));
            }
            Err(e) => return Err(CoinsetError::Parse(format!("{context}: {e}"))),
        };
        if !status.is_success() || !envelope.is_success() {
            return Err(map_api_failure(status, &envelope, context));
        }
        envelope
            .data
            .ok_or_else(|| CoinsetError::Parse(format!("{context}: response has no data")))
    }
}

fn parse_base_url(s: &str) -> Result<Url, CoinsetError> {
    Url::parse(s.trim()).map_err(|e| CoinsetError::InvalidArg(format!("invalid base url {s}: {e}")))
}

fn map_http_err(e: &reqwest::Error, context: &str) -> CoinsetError {
    if e.is_timeout() {
        CoinsetError::connector(CONNECTOR_NAME, format!("request timed out: {context}"))
    } else if e.is_decode() {
        CoinsetError::Parse(format!("{context}: {e}"))
    } else {
        CoinsetError::connector(CONNECTOR_NAME, e.to_string())
    }
}

fn map_api_failure<T>(status: StatusCode, env: &Envelope<T>, context: &str) -> CoinsetError {
    let kind = env.kind.as_deref().unwrap_or_default();
    if kind.contains("NOT_FOUND") {
        return CoinsetError::not_found(context.to_string());
    }
    let msg = env.message.as_deref().unwrap_or(kind);
    if status.is_success() {
        CoinsetError::connector(CONNECTOR_NAME, format!("{msg}: {context}"))
    } else {
        CoinsetError::connector(CONNECTOR_NAME, format!("status {status}: {msg}: {context}"))
    }
}

#[async_trait]
impl CrCatalog for RealAdapter {
    async fn coins(&self) -> Result<Vec<WireCoin>, CoinsetError> {
        let url = self.endpoint("coins")?;
        let data: CoinsData = self.get_data(url, "coin catalog").await?;
        Ok(data.coins)
    }
}

#[async_trait]
impl CrHistory for RealAdapter {
    async fn history(
        &self,
        id: CoinId,
        timeframe: Timeframe,
        base: &str,
    ) -> Result<Vec<WirePoint>, CoinsetError> {
        let mut url = self.endpoint(&format!("coin/{id}/history/{timeframe}"))?;
        url.query_pairs_mut().append_pair("base", base);
        let data: HistoryData = self
            .get_data(url, &format!("history for coin {id}"))
            .await?;
        Ok(data.history)
    }
}

/* -------- Lightweight closure adapters ------- */

impl dyn CrCatalog {
    /// Build a `CrCatalog` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn CrCatalog>
    where
        F: Send + Sync + 'static + Fn() -> Result<Vec<WireCoin>, CoinsetError>,
    {
        struct FnCatalog<F>(F);
        #[async_trait]
        impl<F> CrCatalog for FnCatalog<F>
        where
            F: Send + Sync + 'static + Fn() -> Result<Vec<WireCoin>, CoinsetError>,
        {
            async fn coins(&self) -> Result<Vec<WireCoin>, CoinsetError> {
                (self.0)()
            }
        }
        Arc::new(FnCatalog(f))
    }
}

impl dyn CrHistory {
    /// Build a `CrHistory` from a closure taking `(id, timeframe, base)`.
    pub fn from_fn<F>(f: F) -> Arc<dyn CrHistory>
    where
        F: Send
            + Sync
            + 'static
            + Fn(CoinId, Timeframe, String) -> Result<Vec<WirePoint>, CoinsetError>,
    {
        struct FnHist<F>(F);
        #[async_trait]
        impl<F> CrHistory for FnHist<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(CoinId, Timeframe, String) -> Result<Vec<WirePoint>, CoinsetError>,
        {
            async fn history(
                &self,
                id: CoinId,
                timeframe: Timeframe,
                base: &str,
            ) -> Result<Vec<WirePoint>, CoinsetError> {
                (self.0)(id, timeframe, base.to_string())
            }
        }
        Arc::new(FnHist(f))
    }
}
