//! Alpha Vantage intraday data provider.
//!
//! Calls `TIME_SERIES_INTRADAY` once per request. No retries and no backoff:
//! the only timeout is the one configured on the HTTP client.
//!
//! The API reports most failures with HTTP 200 and a top-level message key
//! (`Error Message`, `Note`, `Information`), so the body is inspected before
//! the time series is parsed.

use super::provider::{DataError, DataProvider};
use crate::domain::{Interval, OutputSize, PriceRecord};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Top-level intraday response. The series key depends on the interval,
/// so everything that is not a known message key is collected in `rest`.
#[derive(Debug, Deserialize)]
struct IntradayResponse {
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(flatten)]
    rest: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SeriesEntry {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

/// Alpha Vantage data provider.
pub struct AlphaVantageProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    output_size: OutputSize,
}

impl AlphaVantageProvider {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        output_size: OutputSize,
    ) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stox/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::NetworkUnreachable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            output_size,
        })
    }

    /// Key of the time series object for an interval, e.g. `Time Series (1min)`.
    fn series_key(interval: Interval) -> String {
        format!("Time Series ({interval})")
    }

    /// Parse the intraday response into records, ascending by timestamp.
    fn parse_response(
        symbol: &str,
        interval: Interval,
        resp: IntradayResponse,
    ) -> Result<Vec<PriceRecord>, DataError> {
        if resp.error_message.is_some() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if let Some(msg) = resp.note.or(resp.information) {
            return Err(DataError::RateLimited(msg));
        }

        let key = Self::series_key(interval);
        let mut rest = resp.rest;
        let series = rest
            .remove(&key)
            .ok_or_else(|| DataError::ResponseFormatChanged(format!("missing '{key}'")))?;

        let entries: BTreeMap<String, SeriesEntry> = serde_json::from_value(series)
            .map_err(|e| DataError::ResponseFormatChanged(format!("bad '{key}' object: {e}")))?;

        if entries.is_empty() {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        entries
            .into_iter()
            .map(|(ts, entry)| parse_entry(&ts, &entry))
            .collect()
    }
}

fn parse_entry(ts: &str, entry: &SeriesEntry) -> Result<PriceRecord, DataError> {
    let timestamp = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT)
        .map_err(|_| DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}")))?;

    Ok(PriceRecord {
        timestamp,
        open: parse_price(ts, "open", &entry.open)?,
        high: parse_price(ts, "high", &entry.high)?,
        low: parse_price(ts, "low", &entry.low)?,
        close: parse_price(ts, "close", &entry.close)?,
        volume: entry.volume.trim().parse().map_err(|_| {
            DataError::ResponseFormatChanged(format!("invalid volume at {ts}: {}", entry.volume))
        })?,
    })
}

fn parse_price(ts: &str, field: &str, raw: &str) -> Result<f64, DataError> {
    raw.trim()
        .parse()
        .map_err(|_| DataError::ResponseFormatChanged(format!("invalid {field} at {ts}: {raw}")))
}

impl DataProvider for AlphaVantageProvider {
    fn name(&self) -> &str {
        "alpha_vantage"
    }

    fn intraday(&self, symbol: &str, interval: Interval) -> Result<Vec<PriceRecord>, DataError> {
        debug!(symbol, %interval, output_size = self.output_size.as_str(), "requesting intraday series");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_INTRADAY"),
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("outputsize", self.output_size.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.without_url().to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DataError::AuthenticationRequired(format!(
                "Alpha Vantage rejected the API key (HTTP {status})"
            )));
        }
        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            });
        }

        let body: IntradayResponse = resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, interval, body)
    }
}
