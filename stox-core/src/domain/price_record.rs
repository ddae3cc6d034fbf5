//! PriceRecord: one intraday bar as delivered by the market-data API.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Intraday OHLCV bar for a single symbol.
///
/// `timestamp` is the exchange wall-clock time reported by the provider
/// (Alpha Vantage reports US/Eastern). Aggregation only reads `timestamp`
/// and `close`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceRecord {
    /// Record carrying only a close price. OHLC are all set to `close`.
    pub fn from_close(timestamp: NaiveDateTime, close: f64) -> Self {
        Self {
            timestamp,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }

    /// Calendar day of this record in exchange time.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Returns true if the close price is unusable.
    pub fn is_void(&self) -> bool {
        self.close.is_nan()
    }

    /// Wall-clock timestamp encoded as seconds since the epoch, read as UTC.
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.and_utc().timestamp()
    }
}
