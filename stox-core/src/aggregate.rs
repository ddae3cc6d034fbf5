//! Day and week high/low of closing prices, plus the latest day's chart points.
//!
//! One stable sort by timestamp, then a single linear pass:
//! - a record at or after `now - week_window` folds into the week range
//! - a record on the calendar day of the last record folds into the day range
//!   and becomes a chart point
//!
//! Nothing is cached; every call recomputes from the records it is given.

use crate::domain::PriceRecord;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WEEK_DAYS: i64 = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("no price records")]
    NotFound,
}

/// Closed low/high range of closing prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
}

impl PriceRange {
    fn new(price: f64) -> Self {
        Self {
            low: price,
            high: price,
        }
    }

    fn fold(range: &mut Option<PriceRange>, price: f64) {
        match range {
            Some(r) => {
                r.low = r.low.min(price);
                r.high = r.high.max(price);
            }
            None => *range = Some(PriceRange::new(price)),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.low <= price && price <= self.high
    }
}

/// One point of the latest-day line: x is epoch seconds, y is the close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub epoch_seconds: i64,
    pub close: f64,
}

/// The four labels shown next to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub day_low: f64,
    pub day_high: f64,
    pub week_low: Option<f64>,
    pub week_high: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub latest_day: NaiveDate,
    pub day: PriceRange,
    /// `None` when no record falls inside the trailing window.
    pub week: Option<PriceRange>,
    pub chart_points: Vec<ChartPoint>,
}

impl Aggregate {
    pub fn statistics(&self) -> Statistics {
        Statistics {
            day_low: self.day.low,
            day_high: self.day.high,
            week_low: self.week.map(|w| w.low),
            week_high: self.week.map(|w| w.high),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    pub week_window: Duration,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            week_window: Duration::days(DEFAULT_WEEK_DAYS),
        }
    }
}

impl AggregateOptions {
    pub fn with_week_days(days: u32) -> Self {
        Self {
            week_window: Duration::days(i64::from(days)),
        }
    }
}

/// Aggregate with the default 7-day week window.
pub fn aggregate(records: &[PriceRecord], now: NaiveDateTime) -> Result<Aggregate, AggregateError> {
    aggregate_with(records, now, AggregateOptions::default())
}

pub fn aggregate_with(
    records: &[PriceRecord],
    now: NaiveDateTime,
    options: AggregateOptions,
) -> Result<Aggregate, AggregateError> {
    let mut sorted: Vec<&PriceRecord> = records.iter().filter(|r| !r.is_void()).collect();
    sorted.sort_by_key(|r| r.timestamp);

    let latest_day = sorted.last().ok_or(AggregateError::NotFound)?.day();
    // A window reaching past chrono's range covers every record.
    let week_start = now
        .checked_sub_signed(options.week_window)
        .unwrap_or(NaiveDateTime::MIN);

    let mut day = None;
    let mut week = None;
    let mut chart_points = Vec::new();

    for record in sorted {
        if record.timestamp >= week_start {
            PriceRange::fold(&mut week, record.close);
        }
        if record.day() == latest_day {
            PriceRange::fold(&mut day, record.close);
            chart_points.push(ChartPoint {
                epoch_seconds: record.epoch_seconds(),
                close: record.close,
            });
        }
    }

    // The last record is always on the latest day.
    let day = day.ok_or(AggregateError::NotFound)?;

    Ok(Aggregate {
        latest_day,
        day,
        week,
        chart_points,
    })
}
