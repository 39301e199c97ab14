//! Calculation pipeline — validate, fetch, aggregate.
//!
//! Both front-ends go through [`calculate_symbol`]; the pipeline owns no
//! state between calls.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::aggregate::{aggregate, AggregateError};
use crate::data::{DataError, FailureKind, IntradayProvider};
use crate::domain::{DaySummary, Ticker, ValidationError, MARKET_TZ};
use crate::report::{self, DisplayTable, IntervalSummary, ReportError};

/// Display category for a failed calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Network,
    Api,
    RateLimit,
    NoData,
    /// Writing an export file failed.
    Export,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Validation => "INPUT",
            ErrorCategory::Network => "NET",
            ErrorCategory::Api => "API",
            ErrorCategory::RateLimit => "RATE",
            ErrorCategory::NoData => "DATA",
            ErrorCategory::Export => "FILE",
        }
    }
}

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Please enter a valid stock/ETF symbol (1-5 letters, alphabetic characters only): {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Empty(#[from] AggregateError),
}

impl CalcError {
    /// Empty results are shown as warnings rather than errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, CalcError::Empty(_))
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::Validation(_) => ErrorCategory::Validation,
            CalcError::Data(e) => match e.kind() {
                FailureKind::Network => ErrorCategory::Network,
                FailureKind::ApiError => ErrorCategory::Api,
                FailureKind::RateLimited => ErrorCategory::RateLimit,
                FailureKind::NoData => ErrorCategory::NoData,
            },
            CalcError::Empty(_) => ErrorCategory::NoData,
        }
    }
}

/// The outcome of one successful calculation.
#[derive(Debug, Clone, Serialize)]
pub struct Calculation {
    pub ticker: Ticker,
    pub as_of: DateTime<Utc>,
    /// Most recent day first.
    pub days: Vec<DaySummary>,
}

impl Calculation {
    pub fn table(&self) -> DisplayTable {
        report::format_for_display(&self.days)
    }

    pub fn summaries(&self) -> [IntervalSummary; 3] {
        report::summary_stats(&self.days)
    }

    pub fn to_csv(&self) -> Result<Vec<u8>, ReportError> {
        report::to_csv(&self.days)
    }

    /// Calendar date of `as_of` in the market zone, used in export names.
    pub fn as_of_date(&self) -> NaiveDate {
        self.as_of.with_timezone(&MARKET_TZ).date_naive()
    }

    pub fn export_file_name(&self) -> String {
        report::export_file_name(&self.ticker, self.as_of_date())
    }
}

/// Fetch and aggregate an already-validated ticker.
pub fn calculate(
    provider: &dyn IntradayProvider,
    ticker: &Ticker,
    now: DateTime<Utc>,
) -> Result<Calculation, CalcError> {
    log::info!("calculating interval averages for {ticker} via {}", provider.name());
    let series = provider.fetch(ticker)?;
    let days = aggregate(&series, now)?;
    Ok(Calculation {
        ticker: ticker.clone(),
        as_of: now,
        days,
    })
}

/// Validate raw user input, then calculate. Invalid input never reaches the provider.
pub fn calculate_symbol(
    provider: &dyn IntradayProvider,
    input: &str,
    now: DateTime<Utc>,
) -> Result<Calculation, CalcError> {
    let ticker = Ticker::parse(input)?;
    calculate(provider, &ticker, now)
}
