//! Raw record normalization
//!
//! Converts `/api/data` records into typed [`PricePoint`]s ordered by date.

use super::{parse_calendar_date, PricePoint};
use crate::api::RawPriceRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do with a record that cannot be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizePolicy {
    /// Drop the record and report it in [`NormalizedSeries::skipped`]
    #[default]
    Skip,
    /// Fail the whole batch on the first bad record
    Reject,
}

/// Why a record could not be converted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    #[error("unparseable date '{0}'")]
    UnparseableDate(String),
    #[error("missing price")]
    MissingPrice,
}

/// A record dropped under [`NormalizePolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// Position in the raw input
    pub index: usize,
    pub reason: SkipReason,
}

/// Batch rejected under [`NormalizePolicy::Reject`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index} rejected: {reason}")]
pub struct NormalizeError {
    pub index: usize,
    pub reason: SkipReason,
}

/// Output of a normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedSeries {
    /// Points in ascending date order
    pub points: Vec<PricePoint>,
    /// Records that were dropped, in input order
    pub skipped: Vec<SkippedRecord>,
}

impl NormalizedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// First and last observation dates
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }
}

/// Converts raw price records into an ordered series
#[derive(Debug, Clone)]
pub struct Normalizer {
    policy: NormalizePolicy,
    derive_log_returns: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            policy: NormalizePolicy::Skip,
            derive_log_returns: true,
        }
    }
}

impl Normalizer {
    /// Create a normalizer with the given policy and no log-return derivation
    pub fn new(policy: NormalizePolicy) -> Self {
        Self {
            policy,
            derive_log_returns: false,
        }
    }

    /// Fill absent log returns from consecutive prices
    pub fn with_log_return_derivation(mut self, enabled: bool) -> Self {
        self.derive_log_returns = enabled;
        self
    }

    /// Normalize a batch of raw records
    ///
    /// The output is sorted ascending by date. Records sharing a date keep
    /// their input order.
    pub fn normalize(&self, records: &[RawPriceRecord]) -> Result<NormalizedSeries, NormalizeError> {
        let mut points = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match convert(record) {
                Ok(point) => points.push(point),
                Err(reason) => match self.policy {
                    NormalizePolicy::Reject => return Err(NormalizeError { index, reason }),
                    NormalizePolicy::Skip => {
                        tracing::warn!(index, reason = %reason, "Skipping price record");
                        skipped.push(SkippedRecord { index, reason });
                    }
                },
            }
        }

        // sort_by_key is stable
        points.sort_by_key(|p| p.date);

        if self.derive_log_returns {
            let derived = derive_log_returns(&mut points);
            tracing::debug!(derived, "Derived missing log returns");
        }

        tracing::debug!(
            points = points.len(),
            skipped = skipped.len(),
            "Normalized price series"
        );

        Ok(NormalizedSeries { points, skipped })
    }
}

fn convert(record: &RawPriceRecord) -> Result<PricePoint, SkipReason> {
    let date = parse_calendar_date(&record.date)
        .ok_or_else(|| SkipReason::UnparseableDate(record.date.clone()))?;
    let price = record.price.ok_or(SkipReason::MissingPrice)?;

    Ok(PricePoint {
        date,
        price,
        log_price: record.log_price,
        log_return: record.log_return,
    })
}

/// Fill absent log returns after the first point; returns how many were filled
///
/// The return is taken against the preceding point in the normalized series,
/// so a skipped record widens the span of the next return. A point sharing
/// its date with the one before gets no derived return.
fn derive_log_returns(points: &mut [PricePoint]) -> usize {
    let mut derived = 0;
    for i in 1..points.len() {
        if points[i].log_return.is_some() || points[i - 1].date == points[i].date {
            continue;
        }
        let prev: f64 = points[i - 1].price.try_into().unwrap_or(0.0);
        let curr: f64 = points[i].price.try_into().unwrap_or(0.0);
        if prev > 0.0 && curr > 0.0 {
            if let Ok(r) = Decimal::try_from((curr / prev).ln()) {
                points[i].log_return = Some(r);
                derived += 1;
            }
        }
    }
    derived
}

impl From<&PricePoint> for RawPriceRecord {
    fn from(point: &PricePoint) -> Self {
        Self {
            date: point.date.format("%Y-%m-%d").to_string(),
            price: Some(point.price),
            log_price: point.log_price,
            log_return: point.log_return,
        }
    }
}
