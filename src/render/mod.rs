//! Terminal presentation of a [`Dashboard`]
//!
//! All rounding happens here, using the `[display]` precision settings.

mod events;

use crate::analysis::{ParameterComparison, RegimeSummary};
use crate::config::DisplayConfig;
use crate::load::Dashboard;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

const RULE_HEAVY: &str = "══════════════════════════════════════════════════════";
const RULE_LIGHT: &str = "───────────────────────────────────────────────────────";

/// Output format for rendered views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// Serialized dashboard snapshot
    Json,
}

/// Renders dashboard views as text
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    display: DisplayConfig,
}

impl Renderer {
    pub fn new(display: DisplayConfig) -> Self {
        Self { display }
    }

    /// Full dashboard in the requested format
    pub fn render(&self, dashboard: &Dashboard, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Table => Ok(self.render_dashboard(dashboard)),
            OutputFormat::Json => serde_json::to_string_pretty(dashboard),
        }
    }

    /// Full dashboard as tables
    pub fn render_dashboard(&self, dashboard: &Dashboard) -> String {
        let mut out = String::new();
        out.push_str(RULE_HEAVY);
        out.push_str("\n       BRENT OIL PRICE CHANGE POINT ANALYSIS\n");
        out.push_str(RULE_HEAVY);
        out.push_str("\n\n");

        out.push_str(&self.render_series_overview(dashboard));
        out.push('\n');

        out.push_str("MODEL PARAMETER SHIFTS\n");
        out.push_str(RULE_LIGHT);
        out.push('\n');
        for parameter in &dashboard.parameters {
            out.push_str(&self.render_parameter(parameter));
            out.push('\n');
        }

        out.push_str(&self.render_markers(dashboard));
        out.push('\n');

        out.push_str("KEY EVENTS\n");
        out.push_str(RULE_LIGHT);
        out.push('\n');
        out.push_str(&self.render_event_table(&dashboard.analysis.events));
        out
    }

    /// Observation count, date range, price extremes and the change point
    pub fn render_series_overview(&self, dashboard: &Dashboard) -> String {
        let series = &dashboard.series;
        let mut out = String::from("PRICE SERIES\n");
        out.push_str(RULE_LIGHT);
        out.push('\n');

        if series.is_empty() {
            out.push_str("No price data available.\n");
        } else {
            out.push_str(&format!(
                "Observations:     {} ({} skipped)\n",
                series.len(),
                series.skipped_count()
            ));
            if let Some((first, last)) = series.date_range() {
                out.push_str(&format!("Date Range:       {} → {}\n", first, last));
            }
            let prices = || series.points.iter().map(|p| p.price);
            if let (Some(first), Some(last)) = (prices().next(), prices().last()) {
                out.push_str(&format!(
                    "First / Last:     {} / {}\n",
                    self.price(first),
                    self.price(last)
                ));
            }
            if let (Some(min), Some(max)) = (prices().min(), prices().max()) {
                out.push_str(&format!(
                    "Price Range:      {} – {}\n",
                    self.price(min),
                    self.price(max)
                ));
            }
            let returns: Vec<Decimal> = series.points.iter().filter_map(|p| p.log_return).collect();
            if let (Some(min), Some(max)) = (returns.iter().min(), returns.iter().max()) {
                out.push_str(&format!(
                    "Log Return Range: {} – {}\n",
                    self.fixed(*min, self.display.return_decimals),
                    self.fixed(*max, self.display.return_decimals)
                ));
            }
        }

        out.push_str(&format!("Change Point:     {}\n", self.change_point_line(dashboard)));
        out
    }

    fn change_point_line(&self, dashboard: &Dashboard) -> String {
        match dashboard.change_point {
            None => "No data".to_string(),
            Some(cp) => {
                let position = match cp.point_index {
                    Some(i) => format!("observation #{}", i + 1),
                    None => "no observation on this date".to_string(),
                };
                format!(
                    "{} ({}; {} before / {} after)",
                    cp.date, position, cp.observations_before, cp.observations_after
                )
            }
        }
    }

    /// One parameter comparison panel
    pub fn render_parameter(&self, parameter: &ParameterComparison) -> String {
        let mut out = format!("{} Comparison\n", parameter.label);
        if !parameter.description.is_empty() {
            out.push_str(&format!("  {}\n", parameter.description));
        }
        if parameter.is_empty() {
            out.push_str("  No data available for this parameter comparison.\n");
            return out;
        }

        out.push_str(&format!(
            "  Before Change Point: {}\n",
            self.regime_line(parameter.before.as_ref())
        ));
        out.push_str(&format!(
            "  After Change Point:  {}\n",
            self.regime_line(parameter.after.as_ref())
        ));

        if let Some(shift) = parameter.mean_shift {
            let overlap = match parameter.intervals_overlap {
                Some(true) => "HDIs overlap",
                Some(false) => "HDIs disjoint",
                None => "HDIs unavailable",
            };
            out.push_str(&format!("  Shift: {} ({})\n", self.signed_stat(shift), overlap));
        }
        out
    }

    fn regime_line(&self, summary: Option<&RegimeSummary>) -> String {
        let Some(summary) = summary else {
            return "No data".to_string();
        };
        let hdi = match summary.credible_interval {
            Some(ci) => format!("[{}, {}]", self.stat(ci.low), self.stat(ci.high)),
            None => "N/A".to_string(),
        };
        let mean = summary
            .mean
            .map(|m| self.stat(m))
            .unwrap_or_else(|| "N/A".to_string());
        format!("Mean = {}, 95% HDI = {}", mean, hdi)
    }

    /// Change point and event reference lines, as the chart would draw them
    pub fn render_markers(&self, dashboard: &Dashboard) -> String {
        let mut out = String::from("CHART MARKERS\n");
        out.push_str(RULE_LIGHT);
        out.push('\n');

        if let Some(cp) = dashboard.change_point.filter(|cp| cp.point_index.is_some()) {
            out.push_str(&format!("{}  Change Point\n", cp.date));
        }
        for plotted in &dashboard.correlation.plotted {
            if plotted.is_shifted() {
                out.push_str(&format!(
                    "{}  {} (event on {})\n",
                    plotted.anchor_date, plotted.event.name, plotted.event.date
                ));
            } else {
                out.push_str(&format!("{}  {}\n", plotted.anchor_date, plotted.event.name));
            }
        }
        let unplotted = dashboard.correlation.unplotted.len();
        if unplotted > 0 {
            out.push_str(&format!(
                "{} event(s) have no observation on their date and are not marked\n",
                unplotted
            ));
        }
        out
    }

    fn price(&self, value: Decimal) -> String {
        format!("${}", self.fixed(value, self.display.price_decimals))
    }

    fn stat(&self, value: Decimal) -> String {
        self.fixed(value, self.display.stat_decimals)
    }

    fn signed_stat(&self, value: Decimal) -> String {
        let s = self.stat(value);
        if value.is_sign_negative() {
            s
        } else {
            format!("+{}", s)
        }
    }

    fn fixed(&self, value: Decimal, decimals: u32) -> String {
        let rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.*}", decimals as usize, rounded)
    }
}
