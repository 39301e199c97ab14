//! Intraday interval definitions — the three fixed clock-time windows.
//!
//! All clock times are US/Eastern wall-clock times. Both endpoints are
//! inclusive: a bar stamped exactly 09:35:00 belongs to the morning window,
//! one stamped 09:35:30 does not.

use chrono::{NaiveTime, Timelike};
use chrono_tz::Tz;

/// The named zone every bar is bucketed in.
pub const MARKET_TZ: Tz = chrono_tz::US::Eastern;

/// A named clock-time window within a trading day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalDefinition {
    /// Short name ("Morning").
    pub name: &'static str,
    /// Column label used in tables and CSV headers.
    pub label: &'static str,
    start_minute: u32,
    end_minute: u32,
}

impl IntervalDefinition {
    const fn new(
        name: &'static str,
        label: &'static str,
        start: (u32, u32),
        end: (u32, u32),
    ) -> Self {
        Self {
            name,
            label,
            start_minute: start.0 * 60 + start.1,
            end_minute: end.0 * 60 + end.1,
        }
    }

    /// Whether a local clock time falls inside the window (inclusive on both ends).
    pub fn contains(&self, time: NaiveTime) -> bool {
        let secs = time.num_seconds_from_midnight();
        secs >= self.start_minute * 60 && secs <= self.end_minute * 60
    }

    /// Start of the window as `HH:MM`.
    pub fn start_label(&self) -> String {
        hhmm(self.start_minute)
    }

    /// End of the window as `HH:MM`.
    pub fn end_label(&self) -> String {
        hhmm(self.end_minute)
    }
}

fn hhmm(minute_of_day: u32) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

pub const MORNING: IntervalDefinition =
    IntervalDefinition::new("Morning", "Morning (9:00-9:35 AM)", (9, 0), (9, 35));

pub const MID_MORNING: IntervalDefinition = IntervalDefinition::new(
    "Mid-Morning",
    "Mid-Morning (11:00-11:30 AM)",
    (11, 0),
    (11, 30),
);

pub const MARKET_CLOSE: IntervalDefinition = IntervalDefinition::new(
    "Market Close",
    "Market Close (3:30-4:00 PM)",
    (15, 30),
    (16, 0),
);

/// All intervals, in column order. `DaySummary::values` is indexed the same way.
pub const INTERVALS: [IntervalDefinition; 3] = [MORNING, MID_MORNING, MARKET_CLOSE];
