//! `coinset <symbol> <timeframe> <base>`
//!
//! Loads one instrument and prints its stats snapshot as JSON on stdout.
//! Logs go to stderr; filter them with `RUST_LOG` (default `warn`).
//!
//! Exit codes: 0 when loaded, 1 when validation fails or the instrument ends
//! up `Failed`, 2 for malformed arguments.

mod connector;

use std::process::ExitCode;

use coinset::{Coinset, CoinsetError, Instrument, Timeframe};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: coinset <symbol> <timeframe> <base>\n  timeframe: 24h | 7d | 30d | 1y | 5y";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(symbol: &str, timeframe: Timeframe, base: &str) -> Result<Instrument, CoinsetError> {
    let coinset = Coinset::builder()
        .with_connector(connector::from_env()?)
        .build()?;
    coinset.load(symbol, timeframe, base).await
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [symbol, timeframe, base] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    let timeframe: Timeframe = match timeframe.parse() {
        Ok(tf) => tf,
        Err(e) => {
            eprintln!("error: {e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let inst = match run(symbol, timeframe, base).await {
        Ok(inst) => inst,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    };

    match serde_json::to_string_pretty(&inst.stats()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(1);
        }
    }
    if inst.is_loaded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
