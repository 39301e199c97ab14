//! DaySummary — one trading day's interval averages.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Text used for an interval with no matching bars, in tables and CSV.
pub const NO_DATA: &str = "No Data";

/// An interval cell: a rounded average price or an explicit no-data marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntervalValue {
    Price(f64),
    NoData,
}

impl IntervalValue {
    pub fn as_price(self) -> Option<f64> {
        match self {
            IntervalValue::Price(p) => Some(p),
            IntervalValue::NoData => None,
        }
    }

    pub fn is_no_data(self) -> bool {
        matches!(self, IntervalValue::NoData)
    }

    /// `$123.45` for prices, `No Data` otherwise.
    pub fn to_currency(self) -> String {
        match self {
            IntervalValue::Price(p) => format!("${p:.2}"),
            IntervalValue::NoData => NO_DATA.to_string(),
        }
    }

    /// Parse an exported cell: `No Data` or a decimal number.
    pub fn parse_cell(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell == NO_DATA {
            return Some(IntervalValue::NoData);
        }
        cell.parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .map(IntervalValue::Price)
    }
}

/// Plain export form: `123.45` or `No Data`.
impl fmt::Display for IntervalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalValue::Price(p) => write!(f, "{p:.2}"),
            IntervalValue::NoData => f.write_str(NO_DATA),
        }
    }
}

impl Serialize for IntervalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IntervalValue::Price(p) => serializer.serialize_f64(*p),
            IntervalValue::NoData => serializer.serialize_str(NO_DATA),
        }
    }
}

/// Averages for one weekday, one value per entry of [`INTERVALS`](super::INTERVALS).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    /// Full weekday name ("Tuesday").
    pub day: String,
    pub values: [IntervalValue; 3],
}

impl DaySummary {
    pub fn new(date: NaiveDate, values: [IntervalValue; 3]) -> Self {
        Self {
            date,
            day: date.format("%A").to_string(),
            values,
        }
    }
}
