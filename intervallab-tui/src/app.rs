//! Application state — single-owner, main-thread only.
//!
//! A calculation is requested by input handling and run by the event loop
//! after the next draw, so the "Fetching…" status is on screen while the
//! blocking request is in flight.

use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};

use intervallab_core::pipeline::ErrorCategory;
use intervallab_core::{calculate, report, CalcError, Calculation, IntradayProvider, Ticker};

/// Longest text accepted in the symbol field.
pub const INPUT_MAX_LEN: usize = 8;

const ERROR_HISTORY_CAP: usize = 50;

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Symbol,
    Results,
}

/// Modal overlays drawn over the main layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    Help,
    ErrorHistory,
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub overlay: Overlay,
    pub symbol_input: String,
    /// Symbol waiting to be fetched on the next loop iteration.
    pub pending: Option<Ticker>,
    pub calculation: Option<Calculation>,
    pub results_scroll: usize,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub export_dir: PathBuf,
    provider: Box<dyn IntradayProvider>,
}

impl AppState {
    pub fn new(provider: Box<dyn IntradayProvider>, export_dir: PathBuf) -> Self {
        Self {
            running: true,
            focus: Focus::Symbol,
            overlay: Overlay::Welcome,
            symbol_input: String::new(),
            pending: None,
            calculation: None,
            results_scroll: 0,
            status_message: None,
            error_history: VecDeque::new(),
            error_scroll: 0,
            export_dir,
            provider,
        }
    }

    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Success));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate the symbol field and queue a calculation.
    ///
    /// Invalid input is reported immediately and never queued.
    pub fn request_calculation(&mut self) {
        if self.is_busy() {
            return;
        }
        match Ticker::parse(&self.symbol_input) {
            Ok(ticker) => {
                self.symbol_input = ticker.to_string();
                self.set_status(format!("Fetching intraday data for {ticker}..."));
                self.pending = Some(ticker);
            }
            Err(e) => {
                let err = CalcError::from(e);
                self.push_error(err.category(), err.to_string(), self.symbol_input.clone());
            }
        }
    }

    /// Run the queued calculation, if any. Blocks until the provider answers.
    pub fn run_pending(&mut self, now: DateTime<Utc>) {
        let Some(ticker) = self.pending.take() else {
            return;
        };

        match calculate(self.provider.as_ref(), &ticker, now) {
            Ok(calc) => {
                self.set_success(format!(
                    "Successfully calculated interval averages for {ticker} ({} days)",
                    calc.days.len()
                ));
                self.calculation = Some(calc);
                self.results_scroll = 0;
                self.focus = Focus::Results;
            }
            Err(e) if e.is_warning() => {
                log::info!("{ticker}: {e}");
                self.calculation = None;
                self.set_warning(e.to_string());
            }
            Err(e) => {
                log::warn!("{ticker}: {e}");
                self.calculation = None;
                self.push_error(e.category(), e.to_string(), ticker.to_string());
            }
        }
    }

    /// Write the current results as CSV into `export_dir`.
    pub fn export_csv(&mut self) {
        let Some(calc) = &self.calculation else {
            self.set_warning("Nothing to export yet. Calculate averages first.");
            return;
        };

        match report::write_csv(&calc.days, &self.export_dir, &calc.ticker, calc.as_of_date()) {
            Ok(path) => self.set_success(format!("Exported {}", path.display())),
            Err(e) => {
                let context = calc.export_file_name();
                self.push_error(ErrorCategory::Export, format!("Export failed: {e}"), context);
            }
        }
    }

    /// Number of rows in the results table.
    pub fn result_rows(&self) -> usize {
        self.calculation.as_ref().map_or(0, |c| c.days.len())
    }

    pub fn scroll_results(&mut self, delta: isize) {
        let max = self.result_rows().saturating_sub(1);
        self.results_scroll = self.results_scroll.saturating_add_signed(delta).min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use intervallab_core::data::{parse_envelope, DataError, IntradaySeries};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeProvider {
        body: Value,
        calls: Arc<AtomicUsize>,
    }

    impl IntradayProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        fn fetch(&self, ticker: &Ticker) -> Result<IntradaySeries, DataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            parse_envelope(ticker.as_str(), "Time Series (5min)", self.body.clone())
        }
    }

    fn app_with(body: Value) -> (AppState, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = FakeProvider {
            body,
            calls: calls.clone(),
        };
        let dir = std::env::temp_dir();
        (AppState::new(Box::new(provider), dir), calls)
    }

    fn one_bar() -> Value {
        json!({ "Time Series (5min)": {
            "2024-01-02 14:10:00": {
                "1. open": "10", "2. high": "12", "3. low": "9",
                "4. close": "11", "5. volume": "100"
            }
        }})
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 21, 0, 0).unwrap()
    }

    #[test]
    fn invalid_symbol_is_rejected_without_fetch() {
        let (mut app, calls) = app_with(one_bar());
        app.symbol_input = "aapl1".into();
        app.request_calculation();
        app.run_pending(now());

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(app.pending.is_none());
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Validation);
    }

    #[test]
    fn valid_symbol_is_queued_then_calculated() {
        let (mut app, calls) = app_with(one_bar());
        app.symbol_input = " spy".into();
        app.request_calculation();

        assert_eq!(app.symbol_input, "SPY");
        assert!(app.is_busy());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Info))));

        app.run_pending(now());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!app.is_busy());
        assert_eq!(app.result_rows(), 1);
        assert_eq!(app.focus, Focus::Results);
        assert!(matches!(app.status_message, Some((_, StatusLevel::Success))));
    }

    #[test]
    fn api_error_clears_results() {
        let (mut app, _) = app_with(json!({ "Error Message": "Invalid API call." }));
        app.symbol_input = "SPY".into();
        app.request_calculation();
        app.run_pending(now());

        assert!(app.calculation.is_none());
        assert_eq!(app.error_history[0].category, ErrorCategory::Api);
        assert_eq!(app.error_history[0].context, "SPY");
    }

    #[test]
    fn empty_window_is_a_warning() {
        let (mut app, _) = app_with(json!({ "Time Series (5min)": {} }));
        app.symbol_input = "SPY".into();
        app.request_calculation();
        app.run_pending(now());

        assert!(app.calculation.is_none());
        assert!(app.error_history.is_empty());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[test]
    fn export_without_results_warns() {
        let (mut app, _) = app_with(one_bar());
        app.export_csv();
        assert!(matches!(app.status_message, Some((_, StatusLevel::Warning))));
    }

    #[test]
    fn export_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = app_with(one_bar());
        app.export_dir = dir.path().to_path_buf();
        app.symbol_input = "SPY".into();
        app.request_calculation();
        app.run_pending(now());
        app.export_csv();

        let path = dir.path().join("SPY_interval_averages_20240105.csv");
        assert!(path.exists());
        assert!(matches!(app.status_message, Some((_, StatusLevel::Success))));
    }

    #[test]
    fn failed_export_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").unwrap();

        let (mut app, _) = app_with(one_bar());
        app.export_dir = blocker;
        app.symbol_input = "SPY".into();
        app.request_calculation();
        app.run_pending(now());
        app.export_csv();

        assert_eq!(app.error_history[0].category, ErrorCategory::Export);
        assert_eq!(app.error_history[0].context, "SPY_interval_averages_20240105.csv");
        assert!(matches!(app.status_message, Some((_, StatusLevel::Error))));
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _) = app_with(one_bar());
        for i in 0..60 {
            app.push_error(ErrorCategory::Network, format!("err {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert_eq!(app.error_history[0].message, "err 59");
    }

    #[test]
    fn scroll_is_clamped() {
        let (mut app, _) = app_with(one_bar());
        app.scroll_results(5);
        assert_eq!(app.results_scroll, 0);
        app.scroll_results(-3);
        assert_eq!(app.results_scroll, 0);
    }
}
