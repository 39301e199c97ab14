//! CLI integration tests. None of these touch the network.

use std::process::Command;

use chrono::NaiveDate;
use intervallab_core::domain::{DaySummary, IntervalValue};
use intervallab_core::report::to_csv;

fn intervallab() -> Command {
    Command::new(env!("CARGO_BIN_EXE_intervallab"))
}

#[test]
fn intervals_lists_all_three_windows() {
    let out = intervallab().arg("intervals").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Morning"));
    assert!(stdout.contains("Mid-Morning"));
    assert!(stdout.contains("15:30 - 16:00"));
}

#[test]
fn invalid_symbol_fails_before_fetching() {
    let out = intervallab()
        .args(["calc", "aapl1", "--api-key", "unused"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(!stdout.contains("Fetching"));
    assert!(stderr.contains("valid stock/ETF symbol"));
    assert!(stderr.contains("Error [INPUT]"));
}

#[test]
fn empty_symbol_uses_same_error_format() {
    let out = intervallab()
        .args(["calc", "  ", "--api-key", "unused"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.starts_with("Error [INPUT]: Please enter a valid stock/ETF symbol"));
}

#[test]
fn show_renders_exported_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("SPY_interval_averages_20240105.csv");
    let days = vec![DaySummary::new(
        NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
        [
            IntervalValue::Price(471.25),
            IntervalValue::NoData,
            IntervalValue::Price(473.0),
        ],
    )];
    std::fs::write(&path, to_csv(&days).unwrap()).unwrap();

    let out = intervallab().arg("show").arg(&path).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("2024-01-04"));
    assert!(stdout.contains("Thursday"));
    assert!(stdout.contains("$471.25"));
    assert!(stdout.contains("No Data"));
    assert!(stdout.contains("7-Day Market Close Average"));
}

#[test]
fn show_rejects_foreign_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let out = intervallab().arg("show").arg(&path).output().unwrap();
    assert!(!out.status.success());
}
