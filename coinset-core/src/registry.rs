//! Symbol to provider-identifier lookup.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;

use crate::CoinsetError;
use crate::connector::CatalogProvider;
use coinset_types::{CatalogEntry, CoinId};

/// Immutable mapping snapshot handed to readers.
pub type SymbolMap = HashMap<String, CoinId>;

/// Canonical form used for registry keys and lookups.
#[must_use]
pub fn canonical_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

/// Entries available before the first successful refresh.
#[must_use]
pub fn builtin_seed() -> Vec<CatalogEntry> {
    vec![CatalogEntry::new("BTC", 1)]
}

/// Process-wide symbol registry with snapshot-replace semantics.
///
/// A refresh builds a complete new map and swaps it in as one `Arc`; readers
/// either see the previous map or the new one, never a mix. Refreshes are
/// serialized so two concurrent catalog fetches cannot interleave their swaps.
/// A failed refresh leaves the previous map in place.
pub struct IdentifierRegistry {
    current: RwLock<Arc<SymbolMap>>,
    refresh_gate: Mutex<()>,
    generation: AtomicU64,
}

impl Default for IdentifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierRegistry {
    /// Registry holding only the built-in seed entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(builtin_seed())
    }

    /// Registry holding the given seed entries. The first entry wins when a
    /// symbol is listed twice.
    #[must_use]
    pub fn with_seed<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        Self {
            current: RwLock::new(Arc::new(build_map(seed))),
            refresh_gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Fetch the provider catalog and replace the whole mapping with it.
    ///
    /// Returns the number of symbols in the new mapping.
    ///
    /// # Errors
    /// Propagates the provider error, or `CoinsetError::Parse` if the catalog
    /// holds no usable entries. In both cases the previous mapping is kept.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "coinset_core::registry::refresh", skip(self, provider))
    )]
    pub async fn refresh(&self, provider: &dyn CatalogProvider) -> Result<usize, CoinsetError> {
        let _gate = self.refresh_gate.lock().await;
        self.fetch_and_replace(provider).await
    }

    /// Refresh only if no refresh has succeeded yet.
    ///
    /// The generation is checked after taking the refresh gate, so callers
    /// racing on a fresh registry trigger one catalog fetch between them.
    /// Returns `None` when the mapping was already refreshed.
    ///
    /// # Errors
    /// Same as [`IdentifierRegistry::refresh`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "coinset_core::registry::refresh_if_unrefreshed",
            skip(self, provider)
        )
    )]
    pub async fn refresh_if_unrefreshed(
        &self,
        provider: &dyn CatalogProvider,
    ) -> Result<Option<usize>, CoinsetError> {
        let _gate = self.refresh_gate.lock().await;
        if self.generation() > 0 {
            return Ok(None);
        }
        self.fetch_and_replace(provider).await.map(Some)
    }

    async fn fetch_and_replace(&self, provider: &dyn CatalogProvider) -> Result<usize, CoinsetError> {
        match provider.catalog().await {
            Ok(entries) => self.replace(entries),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %e, "catalog refresh failed; keeping previous mapping");
                Err(e)
            }
        }
    }

    /// Replace the whole mapping with `entries`.
    ///
    /// # Errors
    /// Returns `CoinsetError::Parse` (and keeps the previous mapping) if no
    /// entry has a non-blank symbol.
    pub fn replace(&self, entries: Vec<CatalogEntry>) -> Result<usize, CoinsetError> {
        let map = build_map(entries);
        if map.is_empty() {
            return Err(CoinsetError::Parse("catalog contained no symbols".into()));
        }
        let count = map.len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(map);
        self.generation.fetch_add(1, Ordering::AcqRel);
        #[cfg(feature = "tracing")]
        tracing::debug!(symbols = count, "identifier registry replaced");
        Ok(count)
    }

    /// Look up the provider identifier for `symbol`.
    ///
    /// # Errors
    /// Returns `CoinsetError::UnknownInstrument` when the symbol is absent from
    /// the current mapping.
    pub fn resolve(&self, symbol: &str) -> Result<CoinId, CoinsetError> {
        self.snapshot()
            .get(&canonical_symbol(symbol))
            .copied()
            .ok_or_else(|| CoinsetError::unknown_instrument(symbol))
    }

    /// True if `symbol` resolves against the current mapping.
    #[must_use]
    pub fn contains(&self, symbol: &str) -> bool {
        self.snapshot().contains_key(&canonical_symbol(symbol))
    }

    /// The current mapping. Later refreshes do not affect a snapshot already taken.
    #[must_use]
    pub fn snapshot(&self) -> Arc<SymbolMap> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Number of successful replacements so far; 0 means only seed entries are loaded.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Number of symbols in the current mapping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// True when the mapping is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

fn build_map<I>(entries: I) -> SymbolMap
where
    I: IntoIterator<Item = CatalogEntry>,
{
    let mut map = SymbolMap::new();
    for e in entries {
        let key = canonical_symbol(&e.symbol);
        if key.is_empty() {
            continue;
        }
        map.entry(key).or_insert(e.id);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_symbol_trims_and_uppercases() {
        assert_eq!(canonical_symbol(" eth "), "ETH");
    }

    #[test]
    fn first_listing_of_a_symbol_wins() {
        let map = build_map([
            CatalogEntry::new("BTC", 1),
            CatalogEntry::new("btc", 99),
            CatalogEntry::new("  ", 7),
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("BTC"), Some(&CoinId(1)));
    }
}
