//! Serde models of the Coinranking v1 public API responses.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de};

/// Top-level response wrapper shared by every endpoint.
///
/// Successful responses carry `status: "success"` and `data`; failures carry
/// `status: "fail"` or `"error"` with a `type` code and a human `message`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// `"success"`, `"fail"` or `"error"`.
    pub status: String,
    /// Endpoint payload when `status` is `"success"`.
    pub data: Option<T>,
    /// Machine-readable failure code, e.g. `COIN_NOT_FOUND`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Human-readable failure message.
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// True for `status: "success"`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}

/// `data` payload of `GET /coins`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinsData {
    /// Listed coins in provider order.
    pub coins: Vec<WireCoin>,
}

/// One catalog row. Fields the pipeline has no use for are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireCoin {
    /// Provider identifier.
    pub id: u64,
    /// Ticker symbol as listed.
    pub symbol: String,
}

/// `data` payload of `GET /coin/{id}/history/{timeframe}`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryData {
    /// Price points, not necessarily one per day.
    pub history: Vec<WirePoint>,
}

/// One `(price, timestamp)` history point.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WirePoint {
    /// Price in the requested base; `None` when the provider sent `null`.
    #[serde(deserialize_with = "price_from_any", default)]
    pub price: Option<Decimal>,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl WirePoint {
    /// Convenience constructor for adapters and tests.
    #[must_use]
    pub const fn new(timestamp: i64, price: Option<Decimal>) -> Self {
        Self { price, timestamp }
    }
}

// Coinranking sends prices as decimal strings; accept bare numbers and null too.
fn price_from_any<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => parse_decimal(&s).map(Some).map_err(de::Error::custom),
        serde_json::Value::Number(n) => parse_decimal(&n.to_string())
            .map(Some)
            .map_err(de::Error::custom),
        other => Err(de::Error::custom(format!("unexpected price value: {other}"))),
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, rust_decimal::Error> {
    let s = s.trim();
    Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s))
}
