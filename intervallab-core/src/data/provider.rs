//! Intraday provider trait and structured error types.
//!
//! The IntradayProvider trait abstracts over the data source so the
//! calculation pipeline can be driven by a fake in tests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Ticker;

/// One provider record, still as the strings the provider sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBar {
    /// Provider timestamp, e.g. `2024-01-02 14:00:00` (UTC).
    pub timestamp: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

/// The raw bar set for one symbol, in whatever order the provider sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntradaySeries {
    pub symbol: String,
    pub bars: Vec<RawBar>,
}

impl IntradaySeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Coarse failure class, one per row of the error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    Network,
    ApiError,
    RateLimited,
    NoData,
}

/// Structured error types for fetch operations.
///
/// These are designed to be displayable in both CLI and TUI contexts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Network error occurred: {0}")]
    Network(String),

    #[error("unexpected response format: {0}")]
    ResponseFormat(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("API Error: {0}")]
    Api(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("No intraday data found for symbol: {symbol}. Please check if the symbol is valid.")]
    NoData { symbol: String },
}

impl DataError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DataError::Network(_) | DataError::ResponseFormat(_) | DataError::Client(_) => {
                FailureKind::Network
            }
            DataError::Api(_) => FailureKind::ApiError,
            DataError::RateLimited(_) => FailureKind::RateLimited,
            DataError::NoData { .. } => FailureKind::NoData,
        }
    }
}

/// A source of intraday bars.
///
/// One call is one attempt: implementations must not retry.
pub trait IntradayProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the raw intraday series for an already-validated symbol.
    fn fetch(&self, ticker: &Ticker) -> Result<IntradaySeries, DataError>;
}
