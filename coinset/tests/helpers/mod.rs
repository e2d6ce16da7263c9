// Shared fixtures so tests can `mod helpers; use helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use coinset::{Coinset, CoinsetConnector};
use coinset_core::{CatalogEntry, Decimal, RawObservation};
use coinset_mock::{DynamicMockConnector, DynamicMockController, MockBehavior, MockConnector};

// 2024-01-01T00:00:00Z
pub const START_MS: i64 = 1_704_067_200_000;
pub const DAY_MS: i64 = 86_400_000;

/// Days of history the static mock serves for BTC.
pub const BTC_DAYS: usize = 45;

/// One observation per day, starting at `START_MS`.
pub fn daily(prices: &[i64]) -> Vec<RawObservation> {
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| RawObservation::new(START_MS + i as i64 * DAY_MS, Decimal::from(*p)))
        .collect()
}

/// `n` days of strictly increasing prices starting at 100.
pub fn ramp(n: usize) -> Vec<RawObservation> {
    let prices: Vec<i64> = (0..n as i64).map(|i| 100 + i).collect();
    daily(&prices)
}

pub fn with_static_mock() -> Coinset {
    Coinset::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .build()
        .unwrap()
}

/// Orchestrator over a dynamic mock whose catalog lists BTC=1 and ETH=2.
pub async fn with_dynamic_mock() -> (Coinset, DynamicMockController) {
    let (mock, ctrl) = DynamicMockConnector::new_with_controller("dyn");
    ctrl.set_catalog_behavior(MockBehavior::Return(vec![
        CatalogEntry::new("BTC", 1u64),
        CatalogEntry::new("ETH", 2u64),
    ]))
    .await;
    let coinset = Coinset::builder()
        .with_connector(mock)
        .window_len(5)
        .build()
        .unwrap();
    (coinset, ctrl)
}

/// Connector that advertises no capabilities at all.
pub struct Inert;

impl CoinsetConnector for Inert {
    fn name(&self) -> &'static str {
        "inert"
    }
}
