mod helpers;

use std::sync::Arc;

use coinset::{CoinId, Coinset, InstrumentState};
use coinset_core::{Decimal, RawObservation};
use coinset_mock::{DynamicMockConnector, MockBehavior, MockConnector};
use futures::future::join_all;
use helpers::*;

#[tokio::test]
async fn thirty_one_days_give_two_rebased_windows() {
    let (mock, ctrl) = DynamicMockConnector::new_with_controller("dyn");
    let prices: Vec<i64> = (0..31).map(|i| 100 + 2 * i).collect();
    ctrl.set_history_behavior(CoinId(1), MockBehavior::Return(daily(&prices)))
        .await;
    let coinset = Coinset::builder()
        .with_connector(mock)
        .refresh_registry_on_first_load(false)
        .train_fraction(0.5)
        .build()
        .unwrap();

    let btc = coinset.load_symbol("BTC").await.unwrap();
    let windows = btc.windows().unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].prices()[0], Decimal::from(100));
    assert_eq!(windows[1].prices()[29], Decimal::from(160));

    let norm = btc.normalized().unwrap();
    assert_eq!(norm[0].values()[0], 0.0);
    assert!((norm[0].values()[1] - (102.0 / 100.0 - 1.0)).abs() < 1e-12);
    assert!((norm[1].values()[1] - (104.0 / 102.0 - 1.0)).abs() < 1e-12);

    let ds = coinset.dataset(&btc).unwrap();
    assert_eq!(ds.split_row, 1);
    assert_eq!(ds.train_features[0].as_slice(), &norm[0].values()[..29]);
    assert_eq!(ds.train_labels[0], norm[0].values()[29]);
    assert_eq!(ds.test_labels[0], norm[1].values()[29]);
}

#[tokio::test]
async fn intraday_points_are_averaged_per_day() {
    let (mock, ctrl) = DynamicMockConnector::new_with_controller("dyn");
    let mut raw = daily(&[10, 30, 50]);
    raw.push(RawObservation::new(START_MS + DAY_MS + 3_600_000, Decimal::from(20)));
    raw.reverse();
    ctrl.set_history_behavior(CoinId(1), MockBehavior::Return(raw))
        .await;
    let coinset = Coinset::builder()
        .with_connector(mock)
        .refresh_registry_on_first_load(false)
        .window_len(3)
        .build()
        .unwrap();

    let btc = coinset.load_symbol("BTC").await.unwrap();
    let prices: Vec<Decimal> = btc.series().unwrap().prices().collect();
    assert_eq!(
        prices,
        vec![Decimal::from(10), Decimal::from(25), Decimal::from(50)]
    );
    assert_eq!(btc.normalized().unwrap()[0].values(), &[0.0, 1.5, 4.0]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_loads_share_one_orchestrator() {
    let coinset = Arc::new(
        Coinset::builder()
            .with_connector(Arc::new(MockConnector::new()))
            .build()
            .unwrap(),
    );

    let tasks = ["BTC", "ETH", "ZERO", "SHORT", "BTC", "ETH"].map(|s| {
        let coinset = Arc::clone(&coinset);
        tokio::spawn(async move { coinset.load_symbol(s).await })
    });

    for res in join_all(tasks).await {
        let inst = res.unwrap().unwrap();
        assert_eq!(inst.state(), InstrumentState::Loaded, "{}", inst.symbol());
    }
    assert!(coinset.registry().generation() >= 1);
}
