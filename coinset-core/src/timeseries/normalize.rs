//! Per-window rebasing to relative change.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::window::Window;

/// Relative-return trajectory of one window, starting at 0 on day 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWindow {
    start: NaiveDate,
    values: Vec<f64>,
}

impl NormalizedWindow {
    /// Build from raw values. Used by tests and callers that already hold
    /// rebased data; `values[0]` is expected to be 0.
    #[must_use]
    pub const fn from_values(start: NaiveDate, values: Vec<f64>) -> Self {
        Self { start, values }
    }

    /// Date of the first price of the source window.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Relative changes, one per day of the window.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Window length L.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the window holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Rebase a window to relative change from its first price.
///
/// `values[k] = price[k] / base - 1` where `base = price[0]`, or `1` when the
/// first price is zero. `values[0]` is always exactly `0.0`.
#[must_use]
pub fn normalize(window: &Window) -> NormalizedWindow {
    let prices = window.prices();
    let base = match prices.first() {
        Some(p) if !p.is_zero() => as_f64(*p),
        _ => 1.0,
    };
    let values = prices
        .iter()
        .enumerate()
        .map(|(k, p)| if k == 0 { 0.0 } else { as_f64(*p) / base - 1.0 })
        .collect();
    NormalizedWindow {
        start: window.start(),
        values,
    }
}

/// Normalize every window independently, preserving order.
#[must_use]
pub fn normalize_all(windows: &[Window]) -> Vec<NormalizedWindow> {
    windows.iter().map(normalize).collect()
}

fn as_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(f64::NAN)
}
