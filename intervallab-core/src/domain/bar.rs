//! PriceRow — a parsed 5-minute bar, stamped in the market time zone.

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;

/// One typed intraday bar.
///
/// Price fields that the provider sent as malformed strings are `None`
/// rather than NaN, so averaging can skip them explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub timestamp: DateTime<Tz>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

impl PriceRow {
    /// Calendar date in the row's zone.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Wall-clock time in the row's zone.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Open, high, low and close, in that order.
    pub fn ohlc(&self) -> [Option<f64>; 4] {
        [self.open, self.high, self.low, self.close]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MARKET_TZ;
    use chrono::TimeZone;

    fn row(open: Option<f64>, close: Option<f64>) -> PriceRow {
        PriceRow {
            timestamp: MARKET_TZ.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap(),
            open,
            high: None,
            low: None,
            close,
            volume: Some(1_000),
        }
    }

    #[test]
    fn ohlc_keeps_column_positions() {
        let r = row(Some(10.0), Some(11.0));
        assert_eq!(r.ohlc(), [Some(10.0), None, None, Some(11.0)]);
    }

    #[test]
    fn date_and_time_are_local() {
        let r = row(Some(1.0), None);
        assert_eq!(r.date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(r.time(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
    }
}
