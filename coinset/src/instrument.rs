use core::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};

use coinset_core::{
    CoinId, CoinsetError, Dataset, NormalizedWindow, PriceSeries, SplitOptions, Timeframe,
    Window, split_with_rng,
};

/// Lifecycle state of an [`Instrument`] snapshot.
///
/// `Unresolved` and `Resolved` are transient inside `Coinset::load`; callers
/// normally observe `Loaded`, `Stale` (a snapshot whose parameters changed but
/// whose data has not been re-derived yet) or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentState {
    /// Symbol not yet looked up.
    Unresolved,
    /// Identifier known, no data fetched yet.
    Resolved,
    /// Derived data matches the snapshot's parameters.
    Loaded,
    /// Parameters changed; derived data belongs to the previous parameters.
    Stale,
    /// The last derivation failed; see [`Instrument::failure`].
    Failed,
}

impl InstrumentState {
    /// Lowercase label, as used in logs and the stats snapshot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unresolved => "unresolved",
            Self::Resolved => "resolved",
            Self::Loaded => "loaded",
            Self::Stale => "stale",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for InstrumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline outputs for one `(timeframe, base)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedData {
    timeframe: Timeframe,
    base: String,
    series: PriceSeries,
    windows: Vec<Window>,
    normalized: Vec<NormalizedWindow>,
}

impl DerivedData {
    pub(crate) const fn new(
        timeframe: Timeframe,
        base: String,
        series: PriceSeries,
        windows: Vec<Window>,
        normalized: Vec<NormalizedWindow>,
    ) -> Self {
        Self {
            timeframe,
            base,
            series,
            windows,
            normalized,
        }
    }

    /// Timeframe the data was fetched for.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Base currency the data was fetched in.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Daily price series.
    #[must_use]
    pub const fn series(&self) -> &PriceSeries {
        &self.series
    }

    /// Overlapping raw-price windows.
    #[must_use]
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Rebased windows, aligned with [`DerivedData::windows`].
    #[must_use]
    pub fn normalized(&self) -> &[NormalizedWindow] {
        &self.normalized
    }
}

/// Immutable snapshot of one instrument and its derived data.
///
/// Changing a parameter never mutates a snapshot; `Coinset::with_timeframe`,
/// `with_base` and `with_symbol` return a new one. Cloning is cheap because
/// derived data sits behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Instrument {
    symbol: String,
    id: CoinId,
    timeframe: Timeframe,
    base: String,
    state: InstrumentState,
    derived: Option<Arc<DerivedData>>,
    failure: Option<CoinsetError>,
}

impl Instrument {
    pub(crate) const fn resolved(
        symbol: String,
        id: CoinId,
        timeframe: Timeframe,
        base: String,
    ) -> Self {
        Self {
            symbol,
            id,
            timeframe,
            base,
            state: InstrumentState::Resolved,
            derived: None,
            failure: None,
        }
    }

    /// Copy of `self` with new parameters, keeping the current data as stale.
    pub(crate) fn stale_with(&self, timeframe: Timeframe, base: String) -> Self {
        Self {
            symbol: self.symbol.clone(),
            id: self.id,
            timeframe,
            base,
            state: InstrumentState::Stale,
            derived: self.derived.clone(),
            failure: None,
        }
    }

    pub(crate) fn into_loaded(self, data: DerivedData) -> Self {
        Self {
            state: InstrumentState::Loaded,
            derived: Some(Arc::new(data)),
            failure: None,
            ..self
        }
    }

    pub(crate) fn into_failed(self, cause: CoinsetError) -> Self {
        Self {
            state: InstrumentState::Failed,
            failure: Some(cause),
            ..self
        }
    }

    /// Canonical (trimmed, upper-case) symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Provider identifier the symbol resolved to.
    #[must_use]
    pub const fn id(&self) -> CoinId {
        self.id
    }

    /// Requested timeframe.
    #[must_use]
    pub const fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Requested base currency (upper-case).
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> InstrumentState {
        self.state
    }

    /// True when derived data matches the snapshot's parameters.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.state == InstrumentState::Loaded
    }

    /// Cause of the last failed derivation, if the snapshot is `Failed`.
    #[must_use]
    pub const fn failure(&self) -> Option<&CoinsetError> {
        self.failure.as_ref()
    }

    fn loaded(&self) -> Option<&DerivedData> {
        if self.is_loaded() {
            self.derived.as_deref()
        } else {
            None
        }
    }

    /// Daily price series; `None` unless `Loaded`.
    #[must_use]
    pub fn series(&self) -> Option<&PriceSeries> {
        self.loaded().map(DerivedData::series)
    }

    /// Raw-price windows; `None` unless `Loaded`.
    #[must_use]
    pub fn windows(&self) -> Option<&[Window]> {
        self.loaded().map(DerivedData::windows)
    }

    /// Normalized windows; `None` unless `Loaded`.
    #[must_use]
    pub fn normalized(&self) -> Option<&[NormalizedWindow]> {
        self.loaded().map(DerivedData::normalized)
    }

    /// Most recent successfully derived data, whatever the current state.
    ///
    /// After a failed reload this still holds the data of the previous
    /// parameters; check [`DerivedData::timeframe`] and [`DerivedData::base`]
    /// before using it.
    #[must_use]
    pub fn last_good(&self) -> Option<&DerivedData> {
        self.derived.as_deref()
    }

    /// Partition the normalized windows into train and test sets.
    ///
    /// # Errors
    /// Returns `CoinsetError::NotLoaded` unless the snapshot is `Loaded`, or
    /// `CoinsetError::InvalidArg` for an out-of-range train fraction.
    pub fn dataset(&self, opts: SplitOptions) -> Result<Dataset, CoinsetError> {
        self.dataset_with_rng(opts, &mut rand::rng())
    }

    /// Like [`Instrument::dataset`] with an explicit RNG for the training shuffle.
    ///
    /// # Errors
    /// Same as [`Instrument::dataset`].
    pub fn dataset_with_rng<R>(&self, opts: SplitOptions, rng: &mut R) -> Result<Dataset, CoinsetError>
    where
        R: Rng + ?Sized,
    {
        let normalized = self.normalized().ok_or_else(|| CoinsetError::NotLoaded {
            symbol: self.symbol.clone(),
            state: self.state.to_string(),
        })?;
        split_with_rng(normalized, opts, rng)
    }

    /// Read-only summary of the snapshot. Never recomputes anything.
    #[must_use]
    pub fn stats(&self) -> InstrumentStats {
        let current = self.loaded();
        InstrumentStats {
            symbol: self.symbol.clone(),
            id: self.id,
            timeframe: self.timeframe,
            base: self.base.clone(),
            state: self.state,
            series_len: current.map_or(0, |d| d.series().len()),
            first_date: current.and_then(|d| d.series().span()).map(|(a, _)| a),
            last_date: current.and_then(|d| d.series().span()).map(|(_, b)| b),
            window_count: current.map_or(0, |d| d.windows().len()),
            normalized_count: current.map_or(0, |d| d.normalized().len()),
            failure: self.failure.as_ref().map(ToString::to_string),
        }
    }
}

/// Serializable summary returned by [`Instrument::stats`].
///
/// Counts describe the data matching the current parameters, so they are zero
/// for any state other than `Loaded`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentStats {
    /// Canonical symbol.
    pub symbol: String,
    /// Provider identifier.
    pub id: CoinId,
    /// Requested timeframe.
    pub timeframe: Timeframe,
    /// Requested base currency.
    pub base: String,
    /// Lifecycle state.
    pub state: InstrumentState,
    /// Number of daily observations.
    pub series_len: usize,
    /// First date of the series.
    pub first_date: Option<NaiveDate>,
    /// Last date of the series.
    pub last_date: Option<NaiveDate>,
    /// Number of raw-price windows.
    pub window_count: usize,
    /// Number of normalized windows.
    pub normalized_count: usize,
    /// Human-readable failure cause when `Failed`.
    pub failure: Option<String>,
}
