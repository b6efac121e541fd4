//! Event table and event detail views

use super::{Renderer, RULE_LIGHT};
use crate::load::Dashboard;
use crate::series::Event;

const MAX_NAME_WIDTH: usize = 48;

impl Renderer {
    /// Numbered table of events in source order
    pub fn render_event_table(&self, events: &[Event]) -> String {
        if events.is_empty() {
            return "No events to display.\n".to_string();
        }

        let name_width = events
            .iter()
            .map(|e| e.name.chars().count())
            .max()
            .unwrap_or(0)
            .clamp(5, MAX_NAME_WIDTH);
        let index_width = events.len().to_string().len().max(1);

        let mut out = format!(
            "{:>iw$}  {:<10}  {:<nw$}  {}\n",
            "#",
            "Date",
            "Event",
            "Description",
            iw = index_width,
            nw = name_width
        );
        for (i, event) in events.iter().enumerate() {
            out.push_str(&format!(
                "{:>iw$}  {:<10}  {:<nw$}  {}\n",
                i + 1,
                event.date,
                truncate(&event.name, name_width),
                truncate(&event.description, self.display.description_width),
                iw = index_width,
                nw = name_width
            ));
        }
        out
    }

    /// Detail view of the event at 1-based `position`
    pub fn render_event_detail(&self, dashboard: &Dashboard, position: usize) -> Option<String> {
        let event = dashboard.event(position)?;

        let mut out = format!("{}\n", event.name);
        out.push_str(RULE_LIGHT);
        out.push('\n');
        out.push_str(&format!("Date: {}\n", event.date));
        if !event.description.is_empty() {
            out.push_str(&format!("{}\n", event.description));
        }

        let anchor = dashboard
            .correlation
            .plotted
            .iter()
            .find(|p| &p.event == event);
        let marker = match anchor {
            Some(p) if p.is_shifted() => format!("Chart: marked at {} (next observation)", p.anchor_date),
            Some(p) => format!("Chart: marked at {}", p.anchor_date),
            None => "Chart: not marked (no observation on this date)".to_string(),
        };
        out.push_str(&marker);
        out.push('\n');

        if let Some(cp) = dashboard.analysis.change_point_date {
            let days = (event.date - cp).num_days();
            let relation = match days {
                0 => "on the change point".to_string(),
                d if d < 0 => format!("{} days before the change point", -d),
                d => format!("{} days after the change point", d),
            };
            out.push_str(&format!("Timing: {}\n", relation));
        }

        Some(out)
    }
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
