//! Load cycle
//!
//! Fetches both endpoints concurrently, then runs normalization, event
//! correlation and parameter formatting in one synchronous pass. The result
//! is an immutable [`Dashboard`]; a reload builds a new one.

use crate::analysis::{
    format_parameters, AnalysisError, AnalysisResult, ChangePointPlacement, ParameterComparison,
    ParameterSpec,
};
use crate::api::{AnalysisApi, ApiError, Endpoint, RawAnalysisResults, RawPriceRecord};
use crate::config::Config;
use crate::series::{
    CorrelationReport, Event, EventCorrelator, NormalizeError, NormalizedSeries, Normalizer,
};
use crate::telemetry::{record_count, record_latency, CountMetric, LatencyMetric};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;

/// Why a load cycle produced no dashboard
#[derive(Debug, Error)]
pub enum LoadError {
    /// One or both fetches failed; every failure is kept, in request order
    #[error("{}", join_failures(.0))]
    Fetch(Vec<ApiError>),
    /// Price records rejected under the `reject` policy
    #[error("/api/data: {0}")]
    Normalize(#[from] NormalizeError),
    /// Change point or event date did not parse
    #[error("/api/analysis_results: {0}")]
    Analysis(#[from] AnalysisError),
}

fn join_failures(failures: &[ApiError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoadError {
    /// Endpoints implicated in the failure, in request order
    pub fn failing_endpoints(&self) -> Vec<Endpoint> {
        match self {
            LoadError::Fetch(failures) => failures.iter().filter_map(ApiError::endpoint).collect(),
            LoadError::Normalize(_) => vec![Endpoint::PriceData],
            LoadError::Analysis(_) => vec![Endpoint::AnalysisResults],
        }
    }
}

/// Everything the presentation layer needs from one load cycle
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub series: NormalizedSeries,
    pub analysis: AnalysisResult,
    pub change_point: Option<ChangePointPlacement>,
    pub correlation: CorrelationReport,
    pub parameters: Vec<ParameterComparison>,
    pub loaded_at: DateTime<Utc>,
}

impl Dashboard {
    /// Events that get a chart marker
    pub fn plotted_events(&self) -> Vec<Event> {
        self.correlation.plotted_events()
    }

    /// Event by 1-based position in the event list
    pub fn event(&self, position: usize) -> Option<&Event> {
        position
            .checked_sub(1)
            .and_then(|i| self.analysis.events.get(i))
    }
}

/// Runs load cycles against an [`AnalysisApi`]
pub struct Loader<A> {
    api: A,
    normalizer: Normalizer,
    correlator: EventCorrelator,
    parameters: Vec<ParameterSpec>,
}

impl<A: AnalysisApi> Loader<A> {
    pub fn new(api: A, config: &Config) -> Self {
        Self {
            api,
            normalizer: Normalizer::new(config.pipeline.normalize_policy)
                .with_log_return_derivation(config.pipeline.derive_log_returns),
            correlator: EventCorrelator::new(config.pipeline.event_matching),
            parameters: config.parameters.clone(),
        }
    }

    /// Fetch both endpoints and build a dashboard
    ///
    /// Both requests always complete before the outcome is decided, so a
    /// double failure reports both endpoints.
    pub async fn load(&self) -> Result<Dashboard, LoadError> {
        let started = Instant::now();
        let (prices, analysis) = tokio::join!(
            self.api.fetch_price_data(),
            self.api.fetch_analysis_results()
        );
        record_latency(LatencyMetric::Load, started.elapsed());

        let (records, raw) = match (prices, analysis) {
            (Ok(records), Ok(raw)) => (records, raw),
            (prices, analysis) => {
                let failures: Vec<ApiError> =
                    [prices.err(), analysis.err()].into_iter().flatten().collect();
                tracing::error!(failures = failures.len(), "Load cycle failed");
                return Err(LoadError::Fetch(failures));
            }
        };

        self.prepare(&records, &raw)
    }

    /// Build a dashboard from already-fetched responses
    pub fn prepare(
        &self,
        records: &[RawPriceRecord],
        raw: &RawAnalysisResults,
    ) -> Result<Dashboard, LoadError> {
        let started = Instant::now();
        let series = self.normalizer.normalize(records)?;
        record_latency(LatencyMetric::Normalize, started.elapsed());
        record_count(CountMetric::SkippedRecords, series.skipped_count());

        let analysis = AnalysisResult::from_raw(raw, &self.parameters)?;

        let started = Instant::now();
        let correlation = self.correlator.correlate(&series.points, &analysis.events);
        record_latency(LatencyMetric::Correlate, started.elapsed());
        record_count(CountMetric::PlottedEvents, correlation.plotted.len());
        record_count(CountMetric::UnplottedEvents, correlation.unplotted.len());

        let change_point = analysis.locate_change_point(&series.points);
        let parameters = format_parameters(&analysis, &self.parameters);

        tracing::info!(
            observations = series.len(),
            skipped = series.skipped_count(),
            events = analysis.events.len(),
            plotted = correlation.plotted.len(),
            change_point = ?analysis.change_point_date,
            "Dashboard ready"
        );

        Ok(Dashboard {
            series,
            analysis,
            change_point,
            correlation,
            parameters,
            loaded_at: Utc::now(),
        })
    }
}
