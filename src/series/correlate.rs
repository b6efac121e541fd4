//! Event-to-series correlation
//!
//! An event can only be drawn as a chart marker if the series has an
//! x-axis position for it, i.e. a point on the same calendar date.

use super::{Event, PricePoint};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Events whose date matches the date of some point in the series
///
/// Output keeps the input event order. Either input being empty gives an
/// empty result.
pub fn correlate_events(points: &[PricePoint], events: &[Event]) -> Vec<Event> {
    if points.is_empty() || events.is_empty() {
        return Vec::new();
    }
    let dates: HashSet<NaiveDate> = points.iter().map(|p| p.date).collect();
    events
        .iter()
        .filter(|e| dates.contains(&e.date))
        .cloned()
        .collect()
}

/// How an event finds its anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Only an observation on the event's own date
    #[default]
    Exact,
    /// Fall forward to the first observation within `max_gap_days`,
    /// so events on weekends and holidays still get a marker
    NextObservation { max_gap_days: u32 },
}

/// An event with its position on the series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlottedEvent {
    pub event: Event,
    /// Date of the point the marker is drawn at
    pub anchor_date: NaiveDate,
    /// Index of that point in the series
    pub point_index: usize,
}

impl PlottedEvent {
    /// Whether the marker sits on a different day than the event
    pub fn is_shifted(&self) -> bool {
        self.anchor_date != self.event.date
    }
}

/// Result of correlating a batch of events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrelationReport {
    /// Events with an anchor, in input order
    pub plotted: Vec<PlottedEvent>,
    /// Events without one, in input order
    pub unplotted: Vec<Event>,
}

impl CorrelationReport {
    pub fn plotted_events(&self) -> Vec<Event> {
        self.plotted.iter().map(|p| p.event.clone()).collect()
    }
}

/// Correlates events against a normalized (date-ascending) series
#[derive(Debug, Clone, Default)]
pub struct EventCorrelator {
    policy: MatchPolicy,
}

impl EventCorrelator {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Split events into plotted and unplotted
    pub fn correlate(&self, points: &[PricePoint], events: &[Event]) -> CorrelationReport {
        let mut report = CorrelationReport::default();
        if events.is_empty() {
            return report;
        }

        // First index wins when the source repeats a date
        let mut index: HashMap<NaiveDate, usize> = HashMap::with_capacity(points.len());
        for (i, p) in points.iter().enumerate() {
            index.entry(p.date).or_insert(i);
        }

        for event in events {
            match self.anchor(points, &index, event.date) {
                Some(point_index) => report.plotted.push(PlottedEvent {
                    event: event.clone(),
                    anchor_date: points[point_index].date,
                    point_index,
                }),
                None => {
                    tracing::debug!(date = %event.date, name = %event.name, "Event has no series point");
                    report.unplotted.push(event.clone());
                }
            }
        }

        tracing::debug!(
            plotted = report.plotted.len(),
            unplotted = report.unplotted.len(),
            "Correlated events"
        );

        report
    }

    fn anchor(
        &self,
        points: &[PricePoint],
        index: &HashMap<NaiveDate, usize>,
        date: NaiveDate,
    ) -> Option<usize> {
        if let Some(&i) = index.get(&date) {
            return Some(i);
        }
        match self.policy {
            MatchPolicy::Exact => None,
            MatchPolicy::NextObservation { max_gap_days } => {
                let i = points.partition_point(|p| p.date < date);
                let next = points.get(i)?;
                let gap = (next.date - date).num_days();
                (gap <= i64::from(max_gap_days)).then_some(i)
            }
        }
    }
}
