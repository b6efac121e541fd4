//! Configuration types for changepoint-viewer

use crate::analysis::ParameterSpec;
use crate::api::DEFAULT_API_URL;
use crate::series::{MatchPolicy, NormalizePolicy};
use crate::telemetry::LogFormat;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Parameter comparison panels, in display order
    #[serde(default = "ParameterSpec::defaults")]
    pub parameters: Vec<ParameterSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            pipeline: PipelineConfig::default(),
            display: DisplayConfig::default(),
            telemetry: TelemetryConfig::default(),
            parameters: ParameterSpec::defaults(),
        }
    }
}

/// Analysis backend connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Data preparation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Handling of price records with bad dates or no price
    #[serde(default)]
    pub normalize_policy: NormalizePolicy,

    /// Compute log returns the source left out
    #[serde(default = "default_true")]
    pub derive_log_returns: bool,

    /// How events are anchored on the series
    #[serde(default)]
    pub event_matching: MatchPolicy,
}

fn default_true() -> bool {
    true
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            normalize_policy: NormalizePolicy::Skip,
            derive_log_returns: true,
            event_matching: MatchPolicy::Exact,
        }
    }
}

/// Rendering precision and layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places for prices
    pub price_decimals: u32,
    /// Decimal places for log returns
    pub return_decimals: u32,
    /// Decimal places for posterior means and HDI bounds
    pub stat_decimals: u32,
    /// Event descriptions longer than this are cut in the table view
    pub description_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            price_decimals: 2,
            return_decimals: 4,
            stat_decimals: 5,
            description_width: 60,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
