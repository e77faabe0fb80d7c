use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One simulated trading day.
///
/// `returns` is the fractional price change from the prior day and satisfies
/// `price(t) ~= price(t-1) * (1 + returns(t))` up to display rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub price: f64,
    pub volume: f64,
    pub market_cap: f64,
    pub returns: f64,
    pub volatility: f64,
}

/// Network activity derived from a single [`DailyObservation`]; `date` is the join key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnChainObservation {
    pub date: NaiveDate,
    pub gas_used: u64,
    pub active_addresses: u64,
    pub transaction_count: u64,
    pub network_value: f64,
    /// TH/s
    pub hash_rate: f64,
}
