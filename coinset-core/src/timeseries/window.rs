//! Fixed-length overlapping windows over a daily series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::series::PriceSeries;

/// A contiguous run of consecutive daily prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    start: NaiveDate,
    prices: Vec<Decimal>,
}

impl Window {
    /// Date of the first price in the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Prices in chronological order.
    #[must_use]
    pub fn prices(&self) -> &[Decimal] {
        &self.prices
    }

    /// Number of prices (the window length L).
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Always false for windows produced by [`build_windows`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Slice `series` into every contiguous window of `len` prices, oldest first.
///
/// A series of length N yields `max(0, N - len + 1)` windows with
/// `windows[i] = series[i..i + len]`. Fewer than `len` observations is not an
/// error: it yields no windows. A `len` of zero also yields no windows.
#[must_use]
pub fn build_windows(series: &PriceSeries, len: usize) -> Vec<Window> {
    if len == 0 {
        return Vec::new();
    }
    series
        .points()
        .windows(len)
        .map(|run| Window {
            start: run[0].date,
            prices: run.iter().map(|p| p.price).collect(),
        })
        .collect()
}
