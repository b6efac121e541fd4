use clap::Parser;
use changepoint_viewer::cli::{Cli, Commands};
use changepoint_viewer::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).unwrap_or_default()
    });
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    // Initialize telemetry
    changepoint_viewer::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Show(args) => {
            tracing::info!(api = %config.api.base_url, "Loading dashboard");
            args.execute(&config).await?;
        }
        Commands::Events(args) => {
            args.execute(&config).await?;
        }
        Commands::Event(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
