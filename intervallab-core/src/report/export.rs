//! CSV export and re-import of day summaries.
//!
//! Columns: Date, Day, then one column per interval. Interval cells hold a
//! two-decimal number or the literal `No Data`; no currency formatting.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use super::display::headers;
use crate::domain::{DaySummary, IntervalValue, Ticker};

/// MIME type for downloads of the export.
pub const CSV_MIME: &str = "text/csv";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected CSV header: {0}")]
    Header(String),

    #[error("row {row}: invalid {column} value '{value}'")]
    Cell {
        row: usize,
        column: String,
        value: String,
    },
}

/// Serialize summaries to CSV bytes with a header row.
pub fn to_csv(days: &[DaySummary]) -> Result<Vec<u8>, ReportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(headers())?;

    for d in days {
        let mut record = vec![d.date.format("%Y-%m-%d").to_string(), d.day.clone()];
        record.extend(d.values.iter().map(|v| v.to_string()));
        wtr.write_record(&record)?;
    }

    wtr.into_inner().map_err(|e| ReportError::Io(e.into_error()))
}

/// Parse CSV produced by [`to_csv`].
pub fn from_csv(bytes: &[u8]) -> Result<Vec<DaySummary>, ReportError> {
    let mut rdr = csv::Reader::from_reader(bytes);

    let found: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if found != headers() {
        return Err(ReportError::Header(found.join(",")));
    }

    let mut days = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let cell = |idx: usize| record.get(idx).unwrap_or_default();
        let bad = |idx: usize| ReportError::Cell {
            row,
            column: headers()[idx].clone(),
            value: cell(idx).to_string(),
        };

        let date = NaiveDate::parse_from_str(cell(0), "%Y-%m-%d").map_err(|_| bad(0))?;
        let mut values = [IntervalValue::NoData; 3];
        for (slot, value) in values.iter_mut().enumerate() {
            *value = IntervalValue::parse_cell(cell(slot + 2)).ok_or_else(|| bad(slot + 2))?;
        }

        days.push(DaySummary {
            date,
            day: cell(1).to_string(),
            values,
        });
    }
    Ok(days)
}

/// `<SYMBOL>_interval_averages_<YYYYMMDD>.csv`
pub fn export_file_name(ticker: &Ticker, date: NaiveDate) -> String {
    format!("{ticker}_interval_averages_{}.csv", date.format("%Y%m%d"))
}

/// Write the export into `dir` and return the file path.
pub fn write_csv(
    days: &[DaySummary],
    dir: &Path,
    ticker: &Ticker,
    date: NaiveDate,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(ticker, date));
    std::fs::write(&path, to_csv(days)?)?;
    log::info!("exported {} days to {}", days.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DaySummary> {
        vec![
            DaySummary::new(
                NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                [
                    IntervalValue::Price(471.25),
                    IntervalValue::NoData,
                    IntervalValue::Price(10.5),
                ],
            ),
            DaySummary::new(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                [IntervalValue::NoData; 3],
            ),
        ]
    }

    #[test]
    fn csv_layout() {
        let text = String::from_utf8(to_csv(&sample()).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Date,Day,Morning (9:00-9:35 AM),Mid-Morning (11:00-11:30 AM),Market Close (3:30-4:00 PM)"
        );
        assert_eq!(lines[1], "2024-01-03,Wednesday,471.25,No Data,10.50");
        assert_eq!(lines[2], "2024-01-02,Tuesday,No Data,No Data,No Data");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_export_is_header_only() {
        let text = String::from_utf8(to_csv(&[]).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn round_trip_preserves_rows() {
        let days = sample();
        let back = from_csv(&to_csv(&days).unwrap()).unwrap();
        assert_eq!(back, days);
    }

    #[test]
    fn rejects_foreign_header() {
        let err = from_csv(b"a,b,c\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ReportError::Header(_)));
    }

    #[test]
    fn rejects_bad_cell() {
        let mut bytes = to_csv(&sample()).unwrap();
        bytes.extend_from_slice(b"2024-01-01,Monday,cheap,No Data,No Data\n");
        match from_csv(&bytes) {
            Err(ReportError::Cell { row, column, value }) => {
                assert_eq!(row, 3);
                assert_eq!(column, "Morning (9:00-9:35 AM)");
                assert_eq!(value, "cheap");
            }
            other => panic!("expected Cell error, got: {other:?}"),
        }
    }

    #[test]
    fn file_name_pattern() {
        let ticker = Ticker::parse("spy").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(
            export_file_name(&ticker, date),
            "SPY_interval_averages_20240105.csv"
        );
    }

    #[test]
    fn write_csv_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let ticker = Ticker::parse("QQQ").unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let path = write_csv(&sample(), dir.path(), &ticker, date).unwrap();
        assert!(path.ends_with("QQQ_interval_averages_20240105.csv"));
        let back = from_csv(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(back.len(), 2);
    }
}
