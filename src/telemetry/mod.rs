//! Telemetry module
//!
//! Structured logging and stage timings

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{record_count, record_latency, CountMetric, LatencyMetric};

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
