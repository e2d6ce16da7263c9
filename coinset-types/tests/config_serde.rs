use std::time::Duration;

use coinset_types::{CoinsetConfig, CoinsetError, SplitOptions};

#[test]
fn config_roundtrip() {
    let cfg = CoinsetConfig {
        window_len: 14,
        split: SplitOptions {
            train_fraction: 0.75,
            shuffle_train: true,
        },
        provider_timeout: Duration::from_millis(2500),
        default_base: "EUR".into(),
        refresh_registry_on_first_load: false,
    };

    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: CoinsetConfig = serde_json::from_str(&json).expect("deserialize config");

    assert_eq!(de.window_len, 14);
    assert_eq!(de.split, cfg.split);
    assert_eq!(de.provider_timeout.as_millis(), 2500);
    assert_eq!(de.default_base, "EUR");
    assert!(!de.refresh_registry_on_first_load);
}

#[test]
fn defaults_match_documented_values() {
    let cfg = CoinsetConfig::default();
    assert_eq!(cfg.window_len, 30);
    assert!((cfg.split.train_fraction - 0.9).abs() < f64::EPSILON);
    assert!(!cfg.split.shuffle_train);
    assert_eq!(cfg.default_base, "USD");
    assert!(cfg.validate().is_ok());
}

#[test]
fn validate_rejects_degenerate_window() {
    let cfg = CoinsetConfig {
        window_len: 1,
        ..CoinsetConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(CoinsetError::InvalidArg(_))));
}

#[test]
fn validate_rejects_out_of_range_fraction() {
    for bad in [-0.1, 1.01, f64::NAN] {
        let split = SplitOptions {
            train_fraction: bad,
            shuffle_train: false,
        };
        assert!(matches!(split.validate(), Err(CoinsetError::InvalidArg(_))));
    }
    for ok in [0.0, 0.5, 1.0] {
        let split = SplitOptions {
            train_fraction: ok,
            shuffle_train: false,
        };
        assert!(split.validate().is_ok());
    }
}

#[test]
fn validate_rejects_blank_base_and_zero_timeout() {
    let blank = CoinsetConfig {
        default_base: "  ".into(),
        ..CoinsetConfig::default()
    };
    assert!(blank.validate().is_err());

    let zero = CoinsetConfig {
        provider_timeout: Duration::ZERO,
        ..CoinsetConfig::default()
    };
    assert!(zero.validate().is_err());
}
