//! Property tests for aggregation and export invariants.
//!
//! Uses proptest to verify:
//! 1. Weekend dates never appear in the output
//! 2. Intervals with no bars are `NoData`, never zero
//! 3. With complete bars, averages are the pooled OHLC mean, rounded to cents
//! 4. Rounding is idempotent
//! 5. CSV export round-trips

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use intervallab_core::aggregate::{aggregate_rows, round2};
use intervallab_core::domain::{DaySummary, IntervalValue, PriceRow, MARKET_TZ};
use intervallab_core::report::{from_csv, to_csv};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (1.0..1000.0_f64).prop_map(|p| (p * 10_000.0).round() / 10_000.0)
}

fn arb_ohlc() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (arb_price(), arb_price(), arb_price(), arb_price())
}

/// Minute offsets within the 10-day window ending at `now()`, on a 5-minute grid.
fn arb_offset_minutes() -> impl Strategy<Value = i64> {
    (0..(10 * 24 * 12_i64)).prop_map(|i| i * 5)
}

/// Friday 2024-01-05, 16:00 EST.
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 21, 0, 0).unwrap()
}

fn row_at(offset_minutes: i64, (o, h, l, c): (f64, f64, f64, f64)) -> PriceRow {
    PriceRow {
        timestamp: (now() - Duration::minutes(offset_minutes)).with_timezone(&MARKET_TZ),
        open: Some(o),
        high: Some(h),
        low: Some(l),
        close: Some(c),
        volume: Some(100),
    }
}

fn arb_rows() -> impl Strategy<Value = Vec<PriceRow>> {
    prop::collection::btree_map(arb_offset_minutes(), arb_ohlc(), 1..200)
        .prop_map(|m| m.into_iter().map(|(off, ohlc)| row_at(off, ohlc)).collect())
}

fn arb_value() -> impl Strategy<Value = IntervalValue> {
    prop_oneof![
        Just(IntervalValue::NoData),
        arb_price().prop_map(|p| IntervalValue::Price(round2(p))),
    ]
}

fn arb_days() -> impl Strategy<Value = Vec<DaySummary>> {
    prop::collection::vec(
        (0..3650_i64, arb_value(), arb_value(), arb_value()),
        0..20,
    )
    .prop_map(|v| {
        let base = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        v.into_iter()
            .map(|(d, a, b, c)| DaySummary::new(base + Duration::days(d), [a, b, c]))
            .collect()
    })
}

// ── 1 & 2. Weekend exclusion, no numeric zero ────────────────────────

proptest! {
    #[test]
    fn no_weekend_rows(rows in arb_rows()) {
        if let Ok(days) = aggregate_rows(rows, now()) {
            for d in &days {
                prop_assert!(!matches!(d.date.weekday(), Weekday::Sat | Weekday::Sun));
            }
        }
    }

    #[test]
    fn empty_intervals_are_no_data_not_zero(rows in arb_rows()) {
        if let Ok(days) = aggregate_rows(rows, now()) {
            for d in &days {
                for v in d.values {
                    if let IntervalValue::Price(p) = v {
                        // Every generated price is >= 1.0, so a real average is too.
                        prop_assert!(p >= 1.0);
                    }
                }
            }
        }
    }

    #[test]
    fn days_are_strictly_descending(rows in arb_rows()) {
        if let Ok(days) = aggregate_rows(rows, now()) {
            for w in days.windows(2) {
                prop_assert!(w[0].date > w[1].date);
            }
        }
    }
}

// ── 3. Pooled OHLC mean ──────────────────────────────────────────────

proptest! {
    /// Bars placed 09:00..09:35 on Tuesday 2024-01-02 all land in the
    /// morning interval; the result is the OHLC mean over those bars.
    #[test]
    fn morning_average_is_pooled_mean(bars in prop::collection::vec(arb_ohlc(), 1..8)) {
        let day_open = MARKET_TZ.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        let rows: Vec<PriceRow> = bars
            .iter()
            .enumerate()
            .map(|(i, &(o, h, l, c))| PriceRow {
                timestamp: day_open + Duration::minutes(5 * i as i64),
                open: Some(o),
                high: Some(h),
                low: Some(l),
                close: Some(c),
                volume: None,
            })
            .collect();

        // Same summation order as the aggregator: per column, then across columns.
        let n = bars.len() as f64;
        let mut sums = [0.0_f64; 4];
        for &(o, h, l, c) in &bars {
            for (sum, p) in sums.iter_mut().zip([o, h, l, c]) {
                *sum += p;
            }
        }
        let expected = round2(sums.iter().map(|s| s / n).sum::<f64>() / 4.0);
        let pooled = bars.iter().flat_map(|&(o, h, l, c)| [o, h, l, c]).sum::<f64>() / (4.0 * n);
        prop_assert!((expected - round2(pooled)).abs() <= 0.010_000_1);

        let days = aggregate_rows(rows, now()).unwrap();
        prop_assert_eq!(days.len(), 1);
        prop_assert_eq!(days[0].values[0], IntervalValue::Price(expected));
        prop_assert_eq!(days[0].values[1], IntervalValue::NoData);
        prop_assert_eq!(days[0].values[2], IntervalValue::NoData);
    }
}

// ── 4 & 5. Rounding and export ───────────────────────────────────────

proptest! {
    #[test]
    fn rounding_is_idempotent(p in -1.0e6..1.0e6_f64) {
        let once = round2(p);
        prop_assert_eq!(round2(once), once);
        let reparsed: f64 = format!("{once:.2}").parse().unwrap();
        prop_assert_eq!(round2(reparsed), once);
    }

    #[test]
    fn csv_round_trip(days in arb_days()) {
        let bytes = to_csv(&days).unwrap();
        let back = from_csv(&bytes).unwrap();
        prop_assert_eq!(back, days);
    }
}
