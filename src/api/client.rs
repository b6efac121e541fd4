//! HTTP client for the analysis backend

use super::{AnalysisApi, ApiError, Endpoint, RawAnalysisResults, RawPriceRecord};
use crate::config::ApiConfig;
use crate::telemetry::{record_latency, LatencyMetric};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// Default backend address (the Flask development server)
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// `reqwest`-backed [`AnalysisApi`]
pub struct HttpApiClient {
    base_url: String,
    client: Client,
}

impl HttpApiClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        tracing::debug!(url = %url, "Fetching from analysis API");

        let started = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%endpoint, status = status.as_u16(), "Analysis API returned error status");
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;
        record_latency(LatencyMetric::Fetch(endpoint), started.elapsed());

        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { endpoint, source })
    }
}

#[async_trait]
impl AnalysisApi for HttpApiClient {
    async fn fetch_price_data(&self) -> Result<Vec<RawPriceRecord>, ApiError> {
        let records: Vec<RawPriceRecord> = self.get_json(Endpoint::PriceData).await?;
        tracing::info!(records = records.len(), "Fetched price data");
        Ok(records)
    }

    async fn fetch_analysis_results(&self) -> Result<RawAnalysisResults, ApiError> {
        let results: RawAnalysisResults = self.get_json(Endpoint::AnalysisResults).await?;
        tracing::info!(
            events = results.events.len(),
            parameters = results.parameter_hdis.len(),
            "Fetched analysis results"
        );
        Ok(results)
    }
}
