//! Event list and event detail commands

use crate::config::Config;
use crate::render::Renderer;
use clap::Args;

#[derive(Args, Debug)]
pub struct EventsArgs {
    /// Only events that get a chart marker
    #[arg(long)]
    pub plotted_only: bool,
}

impl EventsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let dashboard = super::load_dashboard(config).await?;
        let renderer = Renderer::new(config.display.clone());

        let events = if self.plotted_only {
            dashboard.plotted_events()
        } else {
            dashboard.analysis.events.clone()
        };
        print!("{}", renderer.render_event_table(&events));
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct EventArgs {
    /// 1-based position in the event list
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub index: u64,
}

impl EventArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let dashboard = super::load_dashboard(config).await?;
        let renderer = Renderer::new(config.display.clone());

        match renderer.render_event_detail(&dashboard, self.index as usize) {
            Some(detail) => {
                print!("{}", detail);
                Ok(())
            }
            None => anyhow::bail!(
                "No event #{} (the analysis lists {} events)",
                self.index,
                dashboard.analysis.events.len()
            ),
        }
    }
}
