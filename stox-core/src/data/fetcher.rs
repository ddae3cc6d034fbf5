//! TickFetcher: the single entry point the presenter uses to get records.
//!
//! The provider is passed in at construction. Each fetch is one direct,
//! blocking call on the caller's thread.

use super::provider::{DataError, DataProvider};
use crate::domain::{normalize_symbol, Interval, PriceRecord};
use tracing::{error, info, warn};

pub struct TickFetcher {
    provider: Box<dyn DataProvider>,
}

impl TickFetcher {
    pub fn new(provider: Box<dyn DataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Returns the records for `symbol` at `interval`, or an empty list.
    ///
    /// Provider failures are logged and swallowed; callers treat an empty
    /// list as "not found".
    pub fn fetch(&self, symbol: &str, interval: Interval) -> Vec<PriceRecord> {
        match self.try_fetch(symbol, interval) {
            Ok(records) => records,
            Err(e) if e.is_not_found() => {
                warn!(symbol, %interval, "no data: {e}");
                Vec::new()
            }
            Err(e) => {
                error!(symbol, %interval, provider = self.provider.name(), "exception while fetching tick data: {e}");
                Vec::new()
            }
        }
    }

    /// Same as [`fetch`](Self::fetch) but keeps the error.
    pub fn try_fetch(&self, symbol: &str, interval: Interval) -> Result<Vec<PriceRecord>, DataError> {
        let symbol = normalize_symbol(symbol).ok_or_else(|| DataError::InvalidSymbol(symbol.to_string()))?;
        let records = self.provider.intraday(&symbol, interval)?;
        info!(symbol = %symbol, %interval, count = records.len(), "fetched intraday records");
        Ok(records)
    }
}
