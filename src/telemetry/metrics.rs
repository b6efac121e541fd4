//! Stage timings and counters
//!
//! Emitted as `debug` tracing events; there is no exporter.

use crate::api::Endpoint;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Round trip to one backend endpoint
    Fetch(Endpoint),
    /// Both fetches, joined
    Load,
    /// Raw records to ordered series
    Normalize,
    /// Event anchoring
    Correlate,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CountMetric {
    /// Price records dropped during normalization
    SkippedRecords,
    /// Events with a chart marker
    PlottedEvents,
    /// Events without one
    UnplottedEvents,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::Fetch(Endpoint::PriceData) => "cpv_fetch_price_data_latency_ms",
        LatencyMetric::Fetch(Endpoint::AnalysisResults) => "cpv_fetch_analysis_latency_ms",
        LatencyMetric::Load => "cpv_load_cycle_latency_ms",
        LatencyMetric::Normalize => "cpv_normalize_latency_ms",
        LatencyMetric::Correlate => "cpv_correlate_latency_ms",
    };

    tracing::debug!(
        metric = metric_name,
        value_ms = duration.as_millis(),
        "Recording latency"
    );
}

/// Record a count
pub fn record_count(metric: CountMetric, value: usize) {
    let metric_name = match metric {
        CountMetric::SkippedRecords => "cpv_skipped_records",
        CountMetric::PlottedEvents => "cpv_plotted_events",
        CountMetric::UnplottedEvents => "cpv_unplotted_events",
    };

    tracing::debug!(metric = metric_name, value = value, "Recording count");
}
