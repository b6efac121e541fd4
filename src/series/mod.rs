//! Price series preparation
//!
//! Turns raw `/api/data` records into a date-ordered series and lines up
//! historical events against it.

mod correlate;
mod date;
mod normalize;

pub use correlate::{correlate_events, CorrelationReport, EventCorrelator, MatchPolicy, PlottedEvent};
pub use date::parse_calendar_date;
pub use normalize::{
    NormalizeError, NormalizePolicy, NormalizedSeries, Normalizer, SkipReason, SkippedRecord,
};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single daily observation of the price series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date
    pub date: NaiveDate,
    /// Closing price (USD)
    pub price: Decimal,
    /// Natural log of the price, when sent by the source
    pub log_price: Option<Decimal>,
    /// Log return against the previous observation
    pub log_return: Option<Decimal>,
}

impl PricePoint {
    /// Create a point with no log fields
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self {
            date,
            price,
            log_price: None,
            log_return: None,
        }
    }

    /// Attach a log return
    pub fn with_log_return(mut self, log_return: Decimal) -> Self {
        self.log_return = Some(log_return);
        self
    }
}

/// A historical event as served by the analysis endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Calendar date of the event
    pub date: NaiveDate,
    /// Short headline
    pub name: String,
    /// Longer explanation
    pub description: String,
}

impl Event {
    pub fn new(date: NaiveDate, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            description: description.into(),
        }
    }
}
