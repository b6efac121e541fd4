//! changepoint-viewer: terminal dashboard for Bayesian change-point analysis
//!
//! This library provides the core components for:
//! - Fetching price data and analysis results from the analysis backend
//! - Normalizing raw price records into a date-ordered series
//! - Anchoring historical events on the series
//! - Before/after comparison of posterior parameter summaries
//! - Rendering the dashboard as terminal tables or JSON

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod load;
pub mod render;
pub mod series;
pub mod telemetry;
