//! Requested historical span for a price history fetch.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoinsetError;

/// Historical span requested from the provider.
///
/// This is independent from the window length used to slice the resulting
/// series: a `30d` history yields about 30 daily observations regardless of
/// how many of them end up in each window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    /// Last 24 hours.
    #[serde(rename = "24h")]
    H24,
    /// Last 7 days.
    #[serde(rename = "7d")]
    D7,
    /// Last 30 days.
    #[default]
    #[serde(rename = "30d")]
    D30,
    /// Last year.
    #[serde(rename = "1y")]
    Y1,
    /// Last five years.
    #[serde(rename = "5y")]
    Y5,
}

impl Timeframe {
    /// Every recognized timeframe, shortest first.
    pub const ALL: [Self; 5] = [Self::H24, Self::D7, Self::D30, Self::Y1, Self::Y5];

    /// Path segment used by the provider.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::H24 => "24h",
            Self::D7 => "7d",
            Self::D30 => "30d",
            Self::Y1 => "1y",
            Self::Y5 => "5y",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = CoinsetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                CoinsetError::InvalidArg(format!(
                    "invalid timeframe '{s}' (expected one of 24h, 7d, 30d, 1y, 5y)"
                ))
            })
    }
}
