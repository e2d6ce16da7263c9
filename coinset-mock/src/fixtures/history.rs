use coinset_core::{CoinId, RawObservation};
use rust_decimal::Decimal;

use super::catalog;

// 2024-01-01T00:00:00Z
const START_MS: i64 = 1_704_067_200_000;
const DAY_MS: i64 = 86_400_000;

pub fn by_id(id: CoinId) -> Option<Vec<RawObservation>> {
    match id.get() {
        catalog::BTC | catalog::TIMEOUT => Some(btc()),
        catalog::ETH => Some(daily(60, |d| Decimal::new(200_000 + 1_200 * d + (d % 5) * 750, 2))),
        catalog::ZERO => Some(daily(35, |d| Decimal::new(50 * d, 2))),
        catalog::SHORT => Some(daily(10, |d| Decimal::from(5 + d))),
        _ => None,
    }
}

// 45 days plus a second noon print on day 10, served newest first.
fn btc() -> Vec<RawObservation> {
    let mut rows = daily(45, |d| Decimal::from(40_000 + 150 * d + (d % 7) * 90));
    rows.push(RawObservation::new(
        START_MS + 10 * DAY_MS + DAY_MS / 2,
        Decimal::from(41_800),
    ));
    rows.reverse();
    rows
}

fn daily(days: i64, price: impl Fn(i64) -> Decimal) -> Vec<RawObservation> {
    (0..days)
        .map(|d| RawObservation::new(START_MS + d * DAY_MS, price(d)))
        .collect()
}
