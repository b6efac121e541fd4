//! Show command implementation

use crate::config::Config;
use crate::render::{OutputFormat, Renderer};
use clap::Args;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ShowArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let dashboard = super::load_dashboard(config).await?;
        let renderer = Renderer::new(config.display.clone());
        println!("{}", renderer.render(&dashboard, self.format)?);
        Ok(())
    }
}
