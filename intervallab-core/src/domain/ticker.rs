//! Ticker — a validated stock/ETF symbol.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Longest symbol accepted.
pub const MAX_TICKER_LEN: usize = 5;

/// Why a symbol was rejected. Checked before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("symbol is empty")]
    Empty,

    #[error("symbol '{0}' must contain letters only")]
    NotAlphabetic(String),

    #[error("symbol '{symbol}' is {len} characters long (max 5)")]
    TooLong { symbol: String, len: usize },
}

/// An upper-case, alphabetic, 1–5 character symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Trim and upper-case user input, then validate it.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let symbol = input.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::NotAlphabetic(symbol));
        }
        let len = symbol.chars().count();
        if len > MAX_TICKER_LEN {
            return Err(ValidationError::TooLong { symbol, len });
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
