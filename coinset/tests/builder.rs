mod helpers;

use std::sync::Arc;
use std::time::Duration;

use coinset::{Coinset, CoinsetConfig, CoinsetError, IdentifierRegistry};
use coinset_mock::MockConnector;
use helpers::Inert;

#[test]
fn build_without_connector_is_invalid() {
    let err = Coinset::builder().build().err().unwrap();
    assert!(matches!(err, CoinsetError::InvalidArg(_)));
}

#[test]
fn connector_without_history_is_unsupported() {
    let err = Coinset::builder()
        .with_connector(Arc::new(Inert))
        .build()
        .err()
        .unwrap();
    assert_eq!(err, CoinsetError::unsupported("history"));
}

#[test]
fn invalid_config_is_rejected() {
    let mk = || Coinset::builder().with_connector(Arc::new(MockConnector::new()));
    assert!(mk().window_len(1).build().is_err());
    assert!(mk().train_fraction(1.5).build().is_err());
    assert!(mk().train_fraction(f64::NAN).build().is_err());
    assert!(mk().provider_timeout(Duration::ZERO).build().is_err());
    assert!(mk().default_base("  ").build().is_err());
}

#[test]
fn modifiers_land_in_config() {
    let c = Coinset::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .window_len(7)
        .train_fraction(0.75)
        .shuffle_train(true)
        .provider_timeout(Duration::from_secs(3))
        .default_base("EUR")
        .refresh_registry_on_first_load(false)
        .build()
        .unwrap();
    let cfg = c.config();
    assert_eq!(cfg.window_len, 7);
    assert!((cfg.split.train_fraction - 0.75).abs() < f64::EPSILON);
    assert!(cfg.split.shuffle_train);
    assert_eq!(cfg.provider_timeout, Duration::from_secs(3));
    assert_eq!(cfg.default_base, "EUR");
    assert!(!cfg.refresh_registry_on_first_load);
    assert_eq!(c.connector_name(), "coinset-mock");
}

#[test]
fn whole_config_can_be_supplied() {
    let cfg = CoinsetConfig {
        window_len: 10,
        ..CoinsetConfig::default()
    };
    let c = Coinset::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .config(cfg)
        .build()
        .unwrap();
    assert_eq!(c.config().window_len, 10);
}

#[tokio::test]
async fn shared_registry_is_refreshed_once_for_all() {
    let registry = Arc::new(IdentifierRegistry::new());
    let a = Coinset::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .registry(Arc::clone(&registry))
        .build()
        .unwrap();
    let b = Coinset::builder()
        .with_connector(Arc::new(MockConnector::new()))
        .registry(Arc::clone(&registry))
        .build()
        .unwrap();

    a.load_symbol("ETH").await.unwrap();
    assert_eq!(registry.generation(), 1);
    b.load_symbol("ETH").await.unwrap();
    assert_eq!(registry.generation(), 1);
    assert!(Arc::ptr_eq(a.registry(), b.registry()));
}
