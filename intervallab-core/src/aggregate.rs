//! Interval aggregation — raw bars to per-day interval averages.
//!
//! Pipeline, in order:
//! 1. parse raw strings into [`PriceRow`]s stamped in US/Eastern
//! 2. keep rows inside the trailing lookback window ending at `now`
//! 3. group by Eastern calendar date, dropping Saturdays and Sundays
//! 4. per day and interval, average each of open/high/low/close over the
//!    matching bars, then average those column means, rounded to cents
//! 5. emit days most recent first
//!
//! The output depends only on the input bars, `now`, and the fixed
//! interval/zone constants.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use thiserror::Error;

use crate::data::{IntradaySeries, RawBar};
use crate::domain::{DaySummary, IntervalDefinition, IntervalValue, PriceRow, INTERVALS, MARKET_TZ};

/// Calendar days of history considered. Ten days leave at least seven
/// trading days once weekends are removed.
pub const LOOKBACK_DAYS: i64 = 10;

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Empty outcomes. Both are reported to the user as warnings, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("No data available for the past 7 days.")]
    EmptyWindow,

    #[error("No trading data available for the specified symbol in the past 7 days.")]
    NoTradingDays,
}

/// Parse a provider timestamp as UTC and convert it to the market zone.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    let naive = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some(Utc.from_utc_datetime(&naive).with_timezone(&MARKET_TZ))
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_volume(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// Parse one raw bar. Bad price or volume strings become `None`; a bad
/// timestamp makes the whole row unusable.
pub fn parse_row(raw: &RawBar) -> Option<PriceRow> {
    let timestamp = parse_timestamp(&raw.timestamp)?;
    Some(PriceRow {
        timestamp,
        open: parse_price(&raw.open),
        high: parse_price(&raw.high),
        low: parse_price(&raw.low),
        close: parse_price(&raw.close),
        volume: parse_volume(&raw.volume),
    })
}

/// Parse every bar of a series, skipping rows with unreadable timestamps.
pub fn parse_rows(series: &IntradaySeries) -> Vec<PriceRow> {
    let mut rows = Vec::with_capacity(series.len());
    for raw in &series.bars {
        match parse_row(raw) {
            Some(row) => rows.push(row),
            None => log::warn!(
                "{}: skipping bar with unreadable timestamp '{}'",
                series.symbol,
                raw.timestamp
            ),
        }
    }
    rows
}

/// Keep rows stamped within `[now - LOOKBACK_DAYS, now]`.
pub fn within_window(rows: Vec<PriceRow>, now: DateTime<Utc>) -> Vec<PriceRow> {
    let end = now.with_timezone(&MARKET_TZ);
    let start = end - Duration::days(LOOKBACK_DAYS);
    rows.into_iter()
        .filter(|r| r.timestamp >= start && r.timestamp <= end)
        .collect()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Round to two decimal places, exact ties to the even cent.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// OHLC mean of the rows inside `interval`.
///
/// Each of open, high, low and close is averaged over the matching bars
/// where it is present, then the column means that exist are averaged.
/// With complete bars this equals the mean of every price pooled together.
/// No matching bar, or only bars without prices, gives `NoData`.
pub fn interval_average(rows: &[&PriceRow], interval: &IntervalDefinition) -> IntervalValue {
    let mut sums = [0.0_f64; 4];
    let mut counts = [0usize; 4];
    for row in rows.iter().filter(|r| interval.contains(r.time())) {
        for (col, price) in row.ohlc().into_iter().enumerate() {
            if let Some(p) = price {
                sums[col] += p;
                counts[col] += 1;
            }
        }
    }

    let column_means: Vec<f64> = sums
        .iter()
        .zip(counts)
        .filter(|(_, n)| *n > 0)
        .map(|(sum, n)| sum / n as f64)
        .collect();

    if column_means.is_empty() {
        IntervalValue::NoData
    } else {
        let mean = column_means.iter().sum::<f64>() / column_means.len() as f64;
        IntervalValue::Price(round2(mean))
    }
}

/// Aggregate already-parsed rows.
pub fn aggregate_rows(
    rows: Vec<PriceRow>,
    now: DateTime<Utc>,
) -> Result<Vec<DaySummary>, AggregateError> {
    let rows = within_window(rows, now);
    if rows.is_empty() {
        return Err(AggregateError::EmptyWindow);
    }
    log::debug!("{} bars inside the {LOOKBACK_DAYS}-day window", rows.len());

    let mut by_date: BTreeMap<NaiveDate, Vec<&PriceRow>> = BTreeMap::new();
    for row in &rows {
        by_date.entry(row.date()).or_default().push(row);
    }

    let days: Vec<DaySummary> = by_date
        .into_iter()
        .rev()
        .filter(|(date, _)| !is_weekend(*date))
        .map(|(date, day_rows)| {
            let values = INTERVALS.map(|interval| interval_average(&day_rows, &interval));
            DaySummary::new(date, values)
        })
        .collect();

    if days.is_empty() {
        return Err(AggregateError::NoTradingDays);
    }
    log::debug!("{} trading days summarized", days.len());
    Ok(days)
}

/// Aggregate a raw provider series relative to `now`.
pub fn aggregate(
    series: &IntradaySeries,
    now: DateTime<Utc>,
) -> Result<Vec<DaySummary>, AggregateError> {
    aggregate_rows(parse_rows(series), now)
}
