use std::sync::Arc;

use coinset::{CoinsetConnector, CoinsetError};
use coinset_coinranking::CoinrankingConnector;

/// Use the offline fixture connector when set (to any value).
pub const USE_MOCK_ENV: &str = "COINSET_USE_MOCK";
/// Override the Coinranking API root.
pub const BASE_URL_ENV: &str = "COINSET_BASE_URL";

/// Pick the connector from the environment.
pub fn from_env() -> Result<Arc<dyn CoinsetConnector>, CoinsetError> {
    if std::env::var_os(USE_MOCK_ENV).is_some() {
        tracing::info!("using mock connector");
        return Ok(Arc::new(coinset_mock::MockConnector::new()));
    }
    let cr = match std::env::var(BASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => CoinrankingConnector::try_with_base_url(&url)?,
        _ => CoinrankingConnector::try_new_default()?,
    };
    Ok(Arc::new(cr))
}
