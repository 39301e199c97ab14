//! Intraday data fetching

pub mod alpha_vantage;
pub mod provider;

pub use alpha_vantage::{parse_envelope, AlphaVantageProvider};
pub use provider::{DataError, FailureKind, IntradayProvider, IntradaySeries, RawBar};
