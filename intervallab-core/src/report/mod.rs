//! Reporting — display formatting, summary metrics and CSV export.

pub mod display;
pub mod export;

pub use display::{format_for_display, headers, summary_stats, DisplayTable, IntervalSummary};
pub use export::{export_file_name, from_csv, to_csv, write_csv, ReportError, CSV_MIME};
