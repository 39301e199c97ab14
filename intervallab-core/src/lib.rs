//! IntervalLab Core — intraday fetcher, interval aggregator, display and export.
//!
//! This crate contains the whole calculation:
//! - Provider configuration passed explicitly to the fetcher
//! - Alpha Vantage 5-minute bar fetcher behind the `IntradayProvider` trait
//! - Aggregation into per-day averages for three fixed US/Eastern windows
//! - Currency-formatted display tables, summary metrics and CSV export
//! - A stateless pipeline tying the three together for the CLI and TUI

pub mod aggregate;
pub mod config;
pub mod data;
pub mod domain;
pub mod pipeline;
pub mod report;

pub use aggregate::{aggregate, AggregateError, LOOKBACK_DAYS};
pub use config::{ConfigError, ProviderConfig};
pub use data::{AlphaVantageProvider, DataError, IntradayProvider, IntradaySeries, RawBar};
pub use domain::{DaySummary, IntervalValue, Ticker, ValidationError, INTERVALS};
pub use pipeline::{calculate, calculate_symbol, CalcError, Calculation, ErrorCategory};
