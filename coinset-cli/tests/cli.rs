use assert_cmd::Command;
use predicates::prelude::*;

fn coinset() -> Command {
    let mut cmd = Command::cargo_bin("coinset").expect("binary built");
    cmd.env("COINSET_USE_MOCK", "1").env_remove("COINSET_BASE_URL");
    cmd
}

#[test]
fn loads_btc_from_mock_and_prints_stats() {
    coinset()
        .args(["btc", "30d", "usd"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""symbol": "BTC""#))
        .stdout(predicate::str::contains(r#""state": "loaded""#))
        .stdout(predicate::str::contains(r#""window_count": 16"#));
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    coinset()
        .args(["BTC", "30d"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("usage"));
}

#[test]
fn bad_timeframe_is_a_usage_error() {
    coinset()
        .args(["BTC", "2w", "USD"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("2w"));
}

#[test]
fn unknown_symbol_exits_with_one() {
    coinset()
        .args(["DOGE", "7d", "USD"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown instrument"));
}

#[test]
fn failed_load_prints_snapshot_and_exits_with_one() {
    coinset()
        .args(["FAIL", "30d", "USD"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""state": "failed""#))
        .stdout(predicate::str::contains("forced failure"));
}

#[test]
fn malformed_base_url_is_reported() {
    Command::cargo_bin("coinset")
        .expect("binary built")
        .env_remove("COINSET_USE_MOCK")
        .env("COINSET_BASE_URL", "not a url")
        .args(["BTC", "30d", "USD"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid base url"));
}
