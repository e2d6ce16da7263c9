//! Daily price series construction.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoinsetError;
use crate::types::{PriceObservation, RawObservation};

/// Ascending-date daily price series with at most one observation per date.
///
/// Built once from provider output and never mutated afterwards; a refresh
/// produces a new series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PriceObservation>,
}

impl PriceSeries {
    /// Build a daily series from raw provider observations.
    ///
    /// - Timestamps are converted to UTC calendar dates.
    /// - Observations sharing a date collapse into one whose price is the
    ///   arithmetic mean of the group.
    /// - The result is sorted ascending by date.
    /// - Empty input yields an empty series.
    ///
    /// # Errors
    /// Returns `CoinsetError::Parse` when a timestamp is outside the
    /// representable range, a price is negative, or a day's price sum overflows.
    pub fn from_raw<I>(raw: I) -> Result<Self, CoinsetError>
    where
        I: IntoIterator<Item = RawObservation>,
    {
        let mut days: BTreeMap<NaiveDate, (Decimal, u32)> = BTreeMap::new();
        for obs in raw {
            let date = date_of(obs.timestamp_ms)?;
            if obs.price < Decimal::ZERO {
                return Err(CoinsetError::Parse(format!(
                    "negative price {} on {date}",
                    obs.price
                )));
            }
            let (sum, count) = days.entry(date).or_insert((Decimal::ZERO, 0));
            *sum = sum.checked_add(obs.price).ok_or_else(|| {
                CoinsetError::Parse(format!("price sum overflow on {date}"))
            })?;
            *count += 1;
        }

        let points = days
            .into_iter()
            .map(|(date, (sum, count))| PriceObservation {
                date,
                price: sum / Decimal::from(count),
            })
            .collect();
        Ok(Self { points })
    }

    /// Wrap already-clean observations, checking the series invariants.
    ///
    /// # Errors
    /// Returns `CoinsetError::InvalidArg` if dates are not strictly increasing
    /// or a price is negative.
    pub fn try_from_observations(points: Vec<PriceObservation>) -> Result<Self, CoinsetError> {
        if let Some(pair) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(CoinsetError::InvalidArg(format!(
                "series dates must be strictly increasing: {} then {}",
                pair[0].date, pair[1].date
            )));
        }
        if let Some(p) = points.iter().find(|p| p.price < Decimal::ZERO) {
            return Err(CoinsetError::InvalidArg(format!(
                "negative price {} on {}",
                p.price, p.date
            )));
        }
        Ok(Self { points })
    }

    /// Number of daily observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observations in ascending date order.
    #[must_use]
    pub fn points(&self) -> &[PriceObservation] {
        &self.points
    }

    /// Prices in ascending date order.
    pub fn prices(&self) -> impl ExactSizeIterator<Item = Decimal> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// First and last dates covered, if any.
    #[must_use]
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }
}

fn date_of(timestamp_ms: i64) -> Result<NaiveDate, CoinsetError> {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| CoinsetError::Parse(format!("timestamp out of range: {timestamp_ms}")))
}
