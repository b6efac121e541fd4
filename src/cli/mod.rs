//! CLI interface for changepoint-viewer
//!
//! Provides subcommands for:
//! - `show`: Load and render the full dashboard
//! - `events`: List the analysis events
//! - `event`: Show one event in detail
//! - `config`: Show the effective configuration

mod events;
mod show;

pub use events::{EventArgs, EventsArgs};
pub use show::ShowArgs;

use crate::api::HttpApiClient;
use crate::config::Config;
use crate::load::{Dashboard, Loader};
use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "changepoint-viewer")]
#[command(about = "Terminal dashboard for Bayesian change-point analysis of Brent oil prices")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Analysis backend base URL (overrides the config file)
    #[arg(long)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load and render the full dashboard
    Show(ShowArgs),
    /// List the analysis events
    Events(EventsArgs),
    /// Show one event in detail
    Event(EventArgs),
    /// Show the effective configuration
    Config,
}

/// Run one load cycle against the configured backend
pub(crate) async fn load_dashboard(config: &Config) -> anyhow::Result<Dashboard> {
    let client = HttpApiClient::new(&config.api)?;
    let loader = Loader::new(client, config);
    loader.load().await.with_context(|| {
        format!(
            "Failed to load analysis data. Please ensure the backend is running at {}",
            config.api.base_url
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;

    #[test]
    fn test_parse_show() {
        let cli = Cli::parse_from(["changepoint-viewer", "show", "--format", "json"]);
        assert_eq!(cli.config, "config.toml");
        match cli.command {
            Commands::Show(args) => assert_eq!(args.format, OutputFormat::Json),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "changepoint-viewer",
            "--config",
            "dash.toml",
            "--api-url",
            "http://10.0.0.5:5000",
            "events",
            "--plotted-only",
        ]);
        assert_eq!(cli.config, "dash.toml");
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:5000"));
        assert!(matches!(cli.command, Commands::Events(EventsArgs { plotted_only: true })));
    }

    #[test]
    fn test_parse_event_index() {
        let cli = Cli::parse_from(["changepoint-viewer", "event", "3"]);
        assert!(matches!(cli.command, Commands::Event(EventArgs { index: 3 })));
    }

    #[test]
    fn test_event_index_must_be_positive() {
        assert!(Cli::try_parse_from(["changepoint-viewer", "event", "0"]).is_err());
    }
}
