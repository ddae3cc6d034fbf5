//! Chart presenter: symbol in, title + four labels + latest-day points out.

use crate::aggregate::{aggregate_with, Aggregate, AggregateOptions, ChartPoint};
use crate::data::TickFetcher;
use crate::domain::{normalize_symbol, Interval, Symbol};
use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use std::fmt::{self, Write as _};
use thiserror::Error;
use tracing::info;

pub const NOT_FOUND_MESSAGE: &str = "Stock symbol not found.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresentError {
    #[error("Stock symbol not found.")]
    NotFound { symbol: String },
}

pub struct ChartPresenter {
    fetcher: TickFetcher,
    interval: Interval,
    options: AggregateOptions,
}

impl ChartPresenter {
    pub fn new(fetcher: TickFetcher, interval: Interval, options: AggregateOptions) -> Self {
        Self {
            fetcher,
            interval,
            options,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Fetch, aggregate and wrap the result for display.
    pub fn present(&self, symbol: &str, now: NaiveDateTime) -> Result<ChartView, PresentError> {
        let not_found = || PresentError::NotFound {
            symbol: symbol.to_string(),
        };
        let symbol = normalize_symbol(symbol).ok_or_else(not_found)?;

        let records = self.fetcher.fetch(&symbol, self.interval);
        let aggregate = aggregate_with(&records, now, self.options).map_err(|_| not_found())?;

        info!(
            symbol = %symbol,
            day = %aggregate.latest_day,
            points = aggregate.chart_points.len(),
            "chart updated"
        );
        Ok(ChartView { symbol, aggregate })
    }
}

/// Everything the chart screen shows for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub symbol: Symbol,
    pub aggregate: Aggregate,
}

impl ChartView {
    /// e.g. `AMZN on 05 Mar 2024`
    pub fn title(&self) -> String {
        format!("{} on {}", self.symbol, self.aggregate.latest_day.format("%d %b %Y"))
    }

    /// Day low, day high, week low, week high, in that order.
    pub fn labels(&self) -> [String; 4] {
        let stats = self.aggregate.statistics();
        [
            format!("Day low: {}", price(Some(stats.day_low))),
            format!("Day high: {}", price(Some(stats.day_high))),
            format!("Week low: {}", price(stats.week_low)),
            format!("Week high: {}", price(stats.week_high)),
        ]
    }

    /// `HH:MM  close` per chart point, oldest first.
    pub fn point_rows(&self) -> Vec<String> {
        self.aggregate.chart_points.iter().map(point_row).collect()
    }

    /// Title, labels and optionally the point rows, newline-separated.
    pub fn render(&self, with_points: bool) -> String {
        let mut out = self.title();
        for label in self.labels() {
            out.push('\n');
            out.push_str(&label);
        }
        if with_points {
            for row in self.point_rows() {
                let _ = write!(out, "\n  {row}");
            }
        }
        out
    }
}

impl fmt::Display for ChartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

fn price(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "n/a".to_string(),
    }
}

fn point_row(point: &ChartPoint) -> String {
    let time = DateTime::from_timestamp(point.epoch_seconds, 0)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string());
    format!("{time}  {:.2}", point.close)
}
