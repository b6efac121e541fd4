//! Parameter comparison panels
//!
//! Pairs the before/after posterior of each model parameter for display.
//! Values stay unrounded here; the renderer picks decimal places.

use super::{AnalysisResult, CredibleInterval, RegimePair, RegimeSummary};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A model parameter and the posterior variables of its two regimes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Short key, e.g. `mu`
    pub name: String,
    /// Panel title
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Posterior variable before the change point, e.g. `mu_1`
    pub before_key: String,
    /// Posterior variable after the change point, e.g. `mu_2`
    pub after_key: String,
}

impl ParameterSpec {
    /// Mean log return and volatility of the two-regime model
    pub fn defaults() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec {
                name: "mu".to_string(),
                label: "Mean Log Return".to_string(),
                description: "Average daily percentage change in oil prices.".to_string(),
                before_key: "mu_1".to_string(),
                after_key: "mu_2".to_string(),
            },
            ParameterSpec {
                name: "sigma".to_string(),
                label: "Volatility (Sigma)".to_string(),
                description: "Measure of daily price fluctuation (risk).".to_string(),
                before_key: "sigma_1".to_string(),
                after_key: "sigma_2".to_string(),
            },
        ]
    }
}

/// Display record for one parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterComparison {
    pub name: String,
    pub label: String,
    pub description: String,
    /// Absent when the backend has neither a mean nor an HDI for the first regime
    pub before: Option<RegimeSummary>,
    /// Absent when the backend has neither a mean nor an HDI for the second regime
    pub after: Option<RegimeSummary>,
    /// Both regime means are present
    pub has_comparison: bool,
    /// `after.mean - before.mean`, when comparable
    pub mean_shift: Option<Decimal>,
    /// Whether the two HDIs overlap, when both exist
    pub intervals_overlap: Option<bool>,
}

impl ParameterComparison {
    pub fn before_mean(&self) -> Option<Decimal> {
        self.before.as_ref().and_then(|s| s.mean)
    }

    pub fn after_mean(&self) -> Option<Decimal> {
        self.after.as_ref().and_then(|s| s.mean)
    }

    pub fn before_interval(&self) -> Option<CredibleInterval> {
        self.before.as_ref().and_then(|s| s.credible_interval)
    }

    pub fn after_interval(&self) -> Option<CredibleInterval> {
        self.after.as_ref().and_then(|s| s.credible_interval)
    }

    /// Neither regime has data
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

/// Build the display record for one parameter
pub fn format_parameter(spec: &ParameterSpec, pair: Option<&RegimePair>) -> ParameterComparison {
    let before = pair.and_then(|p| p.before.clone());
    let after = pair.and_then(|p| p.after.clone());

    let (has_comparison, mean_shift) = match (
        before.as_ref().and_then(|s| s.mean),
        after.as_ref().and_then(|s| s.mean),
    ) {
        (Some(b), Some(a)) => (true, Some(a - b)),
        _ => (false, None),
    };

    let intervals_overlap = match (
        before.as_ref().and_then(|s| s.credible_interval),
        after.as_ref().and_then(|s| s.credible_interval),
    ) {
        (Some(b), Some(a)) => Some(b.overlaps(&a)),
        _ => None,
    };

    ParameterComparison {
        name: spec.name.clone(),
        label: spec.label.clone(),
        description: spec.description.clone(),
        before,
        after,
        has_comparison,
        mean_shift,
        intervals_overlap,
    }
}

/// Display records for every configured parameter, in configuration order
pub fn format_parameters(result: &AnalysisResult, specs: &[ParameterSpec]) -> Vec<ParameterComparison> {
    specs
        .iter()
        .map(|spec| format_parameter(spec, result.parameter_summaries.get(&spec.name)))
        .collect()
}
