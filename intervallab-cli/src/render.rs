//! Plain-text rendering of result tables and summary metrics.

use intervallab_core::domain::INTERVALS;
use intervallab_core::report::{DisplayTable, IntervalSummary};

/// Render a table with left-aligned text columns and right-aligned price columns.
pub fn render_table(table: &DisplayTable) -> String {
    let widths = table.column_widths();
    let mut out = String::new();

    let header: Vec<String> = table
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{h:<w$}"))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(total));
    out.push('\n');

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, &w))| {
                if i < 2 {
                    format!("{cell:<w$}")
                } else {
                    format!("{cell:>w$}")
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// One line per summary metric.
pub fn render_summary(stats: &[IntervalSummary]) -> String {
    let width = stats.iter().map(|s| s.title.len()).max().unwrap_or(0);
    stats
        .iter()
        .map(|s| format!("{:<width$}  {}\n", s.title, s.value.to_currency()))
        .collect()
}

/// The interval legend shown by `intervallab intervals`.
pub fn render_intervals() -> String {
    let mut out = String::from("Trading Intervals (US/Eastern):\n");
    for i in &INTERVALS {
        out.push_str(&format!(
            "  {:<13} {} - {}\n",
            i.name,
            i.start_label(),
            i.end_label()
        ));
    }
    out
}
