//! Change-point analysis model
//!
//! Typed view of `/api/analysis_results`: the change point, the event list
//! and per-parameter posterior summaries for the two regimes.

mod parameters;

pub use parameters::{format_parameter, format_parameters, ParameterComparison, ParameterSpec};

use crate::api::{RawAnalysisResults, RawInterval};
use crate::series::{parse_calendar_date, Event, PricePoint};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Analysis output that fails the load cycle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("unparseable change point date '{0}'")]
    ChangePointDate(String),
    #[error("event {index}: unparseable date '{raw}'")]
    EventDate { index: usize, raw: String },
}

/// Bounds of a credible interval, `low <= high`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredibleInterval {
    pub low: Decimal,
    pub high: Decimal,
}

impl CredibleInterval {
    /// Build from two bounds in either order
    pub fn new(a: Decimal, b: Decimal) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn overlaps(&self, other: &CredibleInterval) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

/// Posterior summary of one parameter in one regime
///
/// At least one of `mean` and `credible_interval` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegimeSummary {
    pub mean: Option<Decimal>,
    /// 95% HDI; absent when the backend could not compute it
    pub credible_interval: Option<CredibleInterval>,
    pub sd: Option<Decimal>,
    pub r_hat: Option<Decimal>,
    pub ess_bulk: Option<Decimal>,
}

impl RegimeSummary {
    pub fn new(mean: Decimal, credible_interval: Option<CredibleInterval>) -> Self {
        Self {
            mean: Some(mean),
            credible_interval,
            sd: None,
            r_hat: None,
            ess_bulk: None,
        }
    }

    /// A regime the backend sent an HDI for but no mean
    pub fn interval_only(credible_interval: CredibleInterval) -> Self {
        Self {
            mean: None,
            credible_interval: Some(credible_interval),
            sd: None,
            r_hat: None,
            ess_bulk: None,
        }
    }
}

/// Before/after summaries of one parameter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegimePair {
    pub before: Option<RegimeSummary>,
    pub after: Option<RegimeSummary>,
}

/// Where the change point falls on the series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangePointPlacement {
    pub date: NaiveDate,
    /// Index of the observation on that date, if any
    pub point_index: Option<usize>,
    pub observations_before: usize,
    pub observations_after: usize,
}

/// One load cycle's analysis output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub change_point_date: Option<NaiveDate>,
    pub events: Vec<Event>,
    /// Keyed by [`ParameterSpec::name`]
    pub parameter_summaries: BTreeMap<String, RegimePair>,
}

impl AnalysisResult {
    /// Build from the wire format for the given parameters
    ///
    /// A change-point or event date that does not parse fails the whole
    /// build. Missing summaries are not errors.
    pub fn from_raw(raw: &RawAnalysisResults, specs: &[ParameterSpec]) -> Result<Self, AnalysisError> {
        let change_point_date = match raw
            .most_probable_change_point_date
            .as_deref()
            .map(str::trim)
        {
            None | Some("") => None,
            Some(s) => Some(
                parse_calendar_date(s).ok_or_else(|| AnalysisError::ChangePointDate(s.to_string()))?,
            ),
        };

        let events = raw
            .events
            .iter()
            .enumerate()
            .map(|(index, e)| {
                let date = parse_calendar_date(&e.date).ok_or_else(|| AnalysisError::EventDate {
                    index,
                    raw: e.date.clone(),
                })?;
                Ok::<_, AnalysisError>(Event::new(date, e.name.clone(), e.description.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let parameter_summaries = specs
            .iter()
            .map(|spec| {
                let pair = RegimePair {
                    before: regime_summary(raw, &spec.before_key),
                    after: regime_summary(raw, &spec.after_key),
                };
                (spec.name.clone(), pair)
            })
            .collect();

        Ok(Self {
            change_point_date,
            events,
            parameter_summaries,
        })
    }

    /// Locate the change point on a date-ascending series
    pub fn locate_change_point(&self, points: &[PricePoint]) -> Option<ChangePointPlacement> {
        let date = self.change_point_date?;
        let before = points.partition_point(|p| p.date < date);
        let point_index = points.get(before).filter(|p| p.date == date).map(|_| before);
        Some(ChangePointPlacement {
            date,
            point_index,
            observations_before: before,
            observations_after: points.len() - before,
        })
    }
}

/// Summary for one posterior variable, `None` when it has neither a mean
/// nor an interval
fn regime_summary(raw: &RawAnalysisResults, key: &str) -> Option<RegimeSummary> {
    let row = raw.summary.get(key);
    let mean = row.and_then(|r| r.mean);

    let from_hdis = raw.parameter_hdis.get(key).copied().flatten().and_then(interval);
    let credible_interval =
        from_hdis.or_else(|| row.and_then(|r| interval((r.hdi_low, r.hdi_high))));

    if mean.is_none() && credible_interval.is_none() {
        return None;
    }

    Some(RegimeSummary {
        mean,
        credible_interval,
        sd: row.and_then(|r| r.sd),
        r_hat: row.and_then(|r| r.r_hat),
        ess_bulk: row.and_then(|r| r.ess_bulk),
    })
}

fn interval(bounds: RawInterval) -> Option<CredibleInterval> {
    match bounds {
        (Some(low), Some(high)) => Some(CredibleInterval::new(low, high)),
        _ => None,
    }
}
