//! Stox Core: intraday price fetching, day/week statistics, favorites.
//!
//! - Domain types (price records, intervals, symbols)
//! - `DataProvider` trait with an Alpha Vantage implementation
//! - `TickFetcher`, which turns provider failures into empty results
//! - Aggregation of day/week high-low and latest-day chart points
//! - Chart presenter producing the title and labels shown to the user
//! - Preferences file and favorites set
//! - TOML configuration

pub mod aggregate;
pub mod config;
pub mod data;
pub mod domain;
pub mod presenter;
pub mod store;

pub use aggregate::{aggregate, aggregate_with, Aggregate, AggregateError, AggregateOptions, Statistics};
pub use config::{ConfigError, StoxConfig};
pub use data::{AlphaVantageProvider, DataError, DataProvider, TickFetcher};
pub use domain::{Interval, OutputSize, PriceRecord};
pub use presenter::{ChartPresenter, ChartView, PresentError};
pub use store::{FavoritesStore, Preferences, StoreError};
