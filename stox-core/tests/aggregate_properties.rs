//! Property tests for aggregation invariants.
//!
//! 1. Day range bounds every close on the latest day
//! 2. Week range bounds every close inside the trailing window
//! 3. Output does not depend on input order

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use stox_core::aggregate::{aggregate, AggregateError};
use stox_core::domain::PriceRecord;

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

// ── Strategies (proptest) ────────────────────────────────────────────

/// Records at distinct minutes spread over roughly two weeks.
fn arb_records() -> impl Strategy<Value = Vec<PriceRecord>> {
    prop::collection::btree_map(0i64..20_000, 1.0..500.0_f64, 1..200).prop_map(|bars| {
        bars.into_iter()
            .map(|(minute, close)| {
                let close = (close * 100.0).round() / 100.0;
                PriceRecord::from_close(base() + Duration::minutes(minute), close)
            })
            .collect()
    })
}

fn arb_now_offset() -> impl Strategy<Value = i64> {
    0i64..30_000
}

proptest! {
    #[test]
    fn day_range_bounds_latest_day(records in arb_records(), offset in arb_now_offset()) {
        let now = base() + Duration::minutes(offset);
        let agg = aggregate(&records, now).unwrap();

        let latest = records.iter().map(|r| r.timestamp).max().unwrap().date();
        prop_assert_eq!(agg.latest_day, latest);

        let day_closes: Vec<f64> = records
            .iter()
            .filter(|r| r.timestamp.date() == latest)
            .map(|r| r.close)
            .collect();
        prop_assert_eq!(agg.chart_points.len(), day_closes.len());
        for close in day_closes {
            prop_assert!(agg.day.contains(close));
        }
        prop_assert!(agg.chart_points.iter().any(|p| p.close == agg.day.low));
        prop_assert!(agg.chart_points.iter().any(|p| p.close == agg.day.high));
    }

    #[test]
    fn week_range_bounds_trailing_window(records in arb_records(), offset in arb_now_offset()) {
        let now = base() + Duration::minutes(offset);
        let agg = aggregate(&records, now).unwrap();

        let window: Vec<f64> = records
            .iter()
            .filter(|r| r.timestamp >= now - Duration::days(7))
            .map(|r| r.close)
            .collect();

        match agg.week {
            Some(week) => {
                prop_assert!(!window.is_empty());
                for close in &window {
                    prop_assert!(week.contains(*close));
                }
                prop_assert!(window.contains(&week.low));
                prop_assert!(window.contains(&week.high));
            }
            None => prop_assert!(window.is_empty()),
        }
    }

    #[test]
    fn order_does_not_matter(
        (sorted, shuffled) in arb_records().prop_flat_map(|r| (Just(r.clone()), Just(r).prop_shuffle())),
        offset in arb_now_offset(),
    ) {
        let now = base() + Duration::minutes(offset);
        prop_assert_eq!(aggregate(&sorted, now), aggregate(&shuffled, now));
    }

    #[test]
    fn chart_points_are_ascending(records in arb_records()) {
        let agg = aggregate(&records, base()).unwrap();
        for pair in agg.chart_points.windows(2) {
            prop_assert!(pair[0].epoch_seconds < pair[1].epoch_seconds);
        }
    }
}

#[test]
fn empty_records_are_not_found() {
    assert_eq!(aggregate(&[], base()), Err(AggregateError::NotFound));
}
