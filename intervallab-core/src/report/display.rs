//! Display formatting — currency-formatted table and summary metrics.

use serde::Serialize;

use crate::domain::{DaySummary, IntervalValue, INTERVALS};

/// A fully formatted table, ready for any text renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DisplayTable {
    /// Widest cell per column, headers included.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        widths
    }
}

/// Column headers shared by the table and the CSV export.
pub fn headers() -> Vec<String> {
    let mut headers = vec!["Date".to_string(), "Day".to_string()];
    headers.extend(INTERVALS.iter().map(|i| i.label.to_string()));
    headers
}

/// Format summaries for display: `$`-prefixed prices, `No Data` as text.
pub fn format_for_display(days: &[DaySummary]) -> DisplayTable {
    let rows = days
        .iter()
        .map(|d| {
            let mut row = vec![d.date.format("%Y-%m-%d").to_string(), d.day.clone()];
            row.extend(d.values.iter().map(|v| v.to_currency()));
            row
        })
        .collect();

    DisplayTable {
        headers: headers(),
        rows,
    }
}

/// Mean of one interval across every displayed day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalSummary {
    /// Metric title, e.g. "7-Day Morning Average".
    pub title: String,
    pub value: IntervalValue,
}

/// One summary metric per interval, ignoring `No Data` days.
pub fn summary_stats(days: &[DaySummary]) -> [IntervalSummary; 3] {
    std::array::from_fn(|idx| {
        let interval = &INTERVALS[idx];
        let prices: Vec<f64> = days
            .iter()
            .filter_map(|d| d.values[idx].as_price())
            .collect();

        let value = if prices.is_empty() {
            IntervalValue::NoData
        } else {
            IntervalValue::Price(prices.iter().sum::<f64>() / prices.len() as f64)
        };

        IntervalSummary {
            title: format!("7-Day {} Average", interval.name),
            value,
        }
    })
}
