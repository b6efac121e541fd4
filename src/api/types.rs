//! Wire types for the analysis backend
//!
//! Field names follow the backend's JSON (pandas column names for
//! `/api/data`, ArviZ summary columns for `summary`).

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One row of `/api/data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPriceRecord {
    #[serde(rename = "Date", alias = "date")]
    pub date: String,
    #[serde(rename = "Price", alias = "price", default)]
    pub price: Option<Decimal>,
    #[serde(
        rename = "log_price",
        alias = "logPrice",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub log_price: Option<Decimal>,
    #[serde(
        rename = "log_returns",
        alias = "log_return",
        alias = "logReturn",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub log_return: Option<Decimal>,
}

/// An HDI as `[low, high]`; either bound may be null
pub type RawInterval = (Option<Decimal>, Option<Decimal>);

/// Body of `/api/analysis_results`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnalysisResults {
    /// Posterior summary rows keyed by variable name (`mu_1`, `tau`, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: BTreeMap<String, RawPosteriorSummary>,
    #[serde(default)]
    pub most_probable_change_point_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameter_hdis: BTreeMap<String, Option<RawInterval>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<RawEvent>,
}

/// One row of an ArviZ posterior summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosteriorSummary {
    #[serde(default)]
    pub mean: Option<Decimal>,
    #[serde(default)]
    pub sd: Option<Decimal>,
    #[serde(rename = "hdi_2.5%", default)]
    pub hdi_low: Option<Decimal>,
    #[serde(rename = "hdi_97.5%", default)]
    pub hdi_high: Option<Decimal>,
    #[serde(default)]
    pub ess_bulk: Option<Decimal>,
    #[serde(default)]
    pub r_hat: Option<Decimal>,
}

/// One entry of the `events` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "Date", alias = "date")]
    pub date: String,
    #[serde(rename = "Event", alias = "event", alias = "name")]
    pub name: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
