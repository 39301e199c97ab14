//! Domain types for IntervalLab

pub mod bar;
pub mod interval;
pub mod summary;
pub mod ticker;

pub use bar::PriceRow;
pub use interval::{IntervalDefinition, INTERVALS, MARKET_TZ};
pub use summary::{DaySummary, IntervalValue, NO_DATA};
pub use ticker::{Ticker, ValidationError};
