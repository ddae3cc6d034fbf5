//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over market-data sources so the fetcher
//! takes its client as a constructor argument and tests can substitute a mock.

use crate::domain::{Interval, PriceRecord};
use std::sync::Arc;
use thiserror::Error;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider: {0}")]
    RateLimited(String),

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("HTTP {status} for {symbol}")]
    Http { status: u16, symbol: String },

    #[error("invalid symbol: '{0}'")]
    InvalidSymbol(String),
}

impl DataError {
    /// True when the provider answered but has nothing for the symbol.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::SymbolNotFound { .. } | DataError::InvalidSymbol(_))
    }
}

/// Trait for intraday market-data providers.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch intraday bars for a symbol at the given interval.
    ///
    /// Records come back in whatever order the provider uses.
    fn intraday(&self, symbol: &str, interval: Interval) -> Result<Vec<PriceRecord>, DataError>;
}

impl<P: DataProvider + ?Sized> DataProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn intraday(&self, symbol: &str, interval: Interval) -> Result<Vec<PriceRecord>, DataError> {
        (**self).intraday(symbol, interval)
    }
}
