//! End-to-end flow with a mock provider: favorites → fetch → aggregate → labels.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use stox_core::aggregate::AggregateOptions;
use stox_core::data::{DataError, DataProvider, TickFetcher};
use stox_core::domain::{Interval, PriceRecord};
use stox_core::presenter::{ChartPresenter, PresentError};
use stox_core::store::{FavoritesStore, Preferences};

/// In-memory provider keyed by symbol. Unknown symbols behave like the API's
/// "Error Message" response.
struct MockProvider {
    series: HashMap<String, Vec<PriceRecord>>,
}

impl DataProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn intraday(&self, symbol: &str, _interval: Interval) -> Result<Vec<PriceRecord>, DataError> {
        if symbol == "DOWN" {
            return Err(DataError::NetworkUnreachable("connection refused".into()));
        }
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })
    }
}

fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn presenter() -> ChartPresenter {
    let mut series = HashMap::new();
    // Provider order is newest first; the aggregator must not care.
    series.insert(
        "AMZN".to_string(),
        vec![
            PriceRecord::from_close(at(5, 9, 31), 99.5),
            PriceRecord::from_close(at(5, 9, 30), 98.0),
            PriceRecord::from_close(at(4, 9, 31), 105.0),
            PriceRecord::from_close(at(4, 9, 30), 100.0),
        ],
    );
    series.insert(
        "MSFT".to_string(),
        vec![PriceRecord::from_close(at(5, 15, 59), 410.25)],
    );
    let fetcher = TickFetcher::new(Box::new(MockProvider { series }));
    ChartPresenter::new(fetcher, Interval::OneMin, AggregateOptions::default())
}

#[test]
fn favorite_symbols_render_their_charts() {
    let dir = tempfile::tempdir().unwrap();
    let favorites = FavoritesStore::new(Preferences::new(dir.path().join("prefs.json")));
    favorites.add("AMZN").unwrap();
    favorites.add("msft").unwrap();

    let presenter = presenter();
    let views: Vec<_> = favorites
        .list()
        .iter()
        .map(|s| presenter.present(s, at(5, 16, 0)).unwrap())
        .collect();

    assert_eq!(views.len(), 2);
    assert_eq!(views[0].title(), "AMZN on 05 Mar 2024");
    assert_eq!(views[0].aggregate.day.low, 98.0);
    assert_eq!(views[0].aggregate.day.high, 99.5);
    assert_eq!(views[0].aggregate.week.unwrap().high, 105.0);
    assert_eq!(views[0].point_rows(), vec!["09:30  98.00", "09:31  99.50"]);

    assert_eq!(views[1].labels()[1], "Day high: 410.25");
}

#[test]
fn unknown_symbol_is_not_found() {
    let err = presenter().present("NOPE", at(5, 16, 0)).unwrap_err();
    assert_eq!(err.to_string(), "Stock symbol not found.");
}

#[test]
fn provider_exception_is_treated_as_not_found() {
    let err = presenter().present("DOWN", at(5, 16, 0)).unwrap_err();
    assert!(matches!(err, PresentError::NotFound { ref symbol } if symbol == "DOWN"));
}

#[test]
fn statistics_are_recomputed_per_fetch() {
    let presenter = presenter();
    let amzn = presenter.present("AMZN", at(5, 16, 0)).unwrap();
    let msft = presenter.present("MSFT", at(5, 16, 0)).unwrap();
    let amzn_again = presenter.present("AMZN", at(5, 16, 0)).unwrap();

    assert_ne!(amzn.aggregate, msft.aggregate);
    assert_eq!(amzn, amzn_again);
}
