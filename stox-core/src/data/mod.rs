//! Market-data access: provider trait, Alpha Vantage client, fetcher.

pub mod alpha_vantage;
pub mod fetcher;
pub mod provider;

pub use alpha_vantage::{AlphaVantageProvider, DEFAULT_BASE_URL};
pub use fetcher::TickFetcher;
pub use provider::{DataError, DataProvider};
