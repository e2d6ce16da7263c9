use std::time::Duration;

use coinset_core::{CoinId, CoinsetError, Decimal, HistoryProvider, PriceSeries, Timeframe};
use coinset_core::connector::CatalogProvider;
use coinset_mock::MockConnector;

#[tokio::test]
async fn catalog_lists_every_fixture_symbol() {
    let entries = MockConnector::new().catalog().await.unwrap();
    let symbols: Vec<&str> = entries.iter().map(|e| e.symbol.as_str()).collect();
    for s in ["BTC", "ETH", "ZERO", "SHORT", "FAIL", "TIMEOUT"] {
        assert!(symbols.contains(&s), "missing {s}");
    }
    let btc = entries.iter().find(|e| e.symbol == "BTC").unwrap();
    assert_eq!(btc.id, CoinId(1));
}

#[tokio::test]
async fn btc_history_collapses_to_45_days() {
    let raw = MockConnector::new()
        .history(CoinId(1), Timeframe::D30, "USD")
        .await
        .unwrap();
    assert_eq!(raw.len(), 46);

    let series = PriceSeries::from_raw(raw).unwrap();
    assert_eq!(series.len(), 45);
    // Day 10 holds 41_770 at midnight and 41_800 at noon
    assert_eq!(series.points()[10].price, Decimal::from(41_785));
}

#[tokio::test]
async fn zero_fixture_starts_at_zero() {
    let raw = MockConnector::new()
        .history(CoinId(3), Timeframe::D30, "USD")
        .await
        .unwrap();
    let series = PriceSeries::from_raw(raw).unwrap();
    assert!(series.points()[0].price.is_zero());
}

#[tokio::test]
async fn fail_fixture_is_a_connector_error() {
    let err = MockConnector::new()
        .history(CoinId(99), Timeframe::D30, "USD")
        .await
        .unwrap_err();
    assert!(matches!(err, CoinsetError::Connector { .. }));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let err = MockConnector::new()
        .history(CoinId(12_345), Timeframe::D30, "USD")
        .await
        .unwrap_err();
    assert!(matches!(err, CoinsetError::NotFound { .. }));
}

#[tokio::test(start_paused = true)]
async fn timeout_fixture_answers_after_delay() {
    let mock = MockConnector::new();
    let fut = mock.history(CoinId(98), Timeframe::D30, "USD");
    assert!(
        tokio::time::timeout(Duration::from_millis(50), fut)
            .await
            .is_err()
    );

    let rows = tokio::time::timeout(
        MockConnector::SLOW_RESPONSE * 2,
        mock.history(CoinId(98), Timeframe::D30, "USD"),
    )
    .await
    .expect("answers within twice the delay")
    .unwrap();
    assert!(!rows.is_empty());
}
