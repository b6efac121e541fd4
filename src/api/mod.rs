//! Analysis backend API
//!
//! The change-point model runs elsewhere; this module only fetches its
//! published output over HTTP.

mod client;
mod types;

pub use client::{HttpApiClient, DEFAULT_API_URL};
pub use types::{RawAnalysisResults, RawEvent, RawInterval, RawPosteriorSummary, RawPriceRecord};

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Backend endpoints consumed by the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Endpoint {
    /// `GET /api/data`
    PriceData,
    /// `GET /api/analysis_results`
    AnalysisResults,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::PriceData => "/api/data",
            Endpoint::AnalysisResults => "/api/analysis_results",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Errors from a single endpoint fetch
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// Network failure or timeout
    #[error("{endpoint}: request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    /// Non-2xx response
    #[error("{endpoint}: HTTP error status {status}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },
    /// Body was not the expected JSON
    #[error("{endpoint}: invalid JSON: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Endpoint the error came from, if any
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            ApiError::Client(_) => None,
            ApiError::Transport { endpoint, .. }
            | ApiError::Status { endpoint, .. }
            | ApiError::Decode { endpoint, .. } => Some(*endpoint),
        }
    }
}

/// Source of analysis data
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    /// Fetch the raw price series
    async fn fetch_price_data(&self) -> Result<Vec<RawPriceRecord>, ApiError>;
    /// Fetch the change-point analysis output
    async fn fetch_analysis_results(&self) -> Result<RawAnalysisResults, ApiError>;
}
