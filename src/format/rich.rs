//! Coloured terminal rendering.

use chrono::Utc;
use rich_rust::Text;
use rich_rust::prelude::*;
use triage_lib::Record;

use super::output::SyncSummary;
use super::text::{format_age, terminal_width, truncate_to_width};

fn color(name: &str) -> Color {
    Color::parse(name).unwrap_or_default()
}

/// Render a record listing with kind badges, ages and dimmed repository names.
pub fn render_records_rich(records: &[&Record], heading: &str) {
    let console = Console::default();

    if records.is_empty() {
        let mut text = Text::new("");
        text.append_styled("\u{2728} ", Style::new().color(color("green")));
        text.append_styled(
            "No open issues or PRs found.",
            Style::new().bold().color(color("green")),
        );
        console.print_renderable(&text);
        return;
    }

    let mut header = Text::new("");
    header.append_styled(heading, Style::new().bold());
    header.append_styled(&format!(" ({} item(s))", records.len()), Style::new().dim());
    console.print_renderable(&header);
    console.print("");

    let now = Utc::now();
    let width = terminal_width();
    for (idx, record) in records.iter().enumerate() {
        let kind_style = if record.is_pull_request() {
            Style::new().color(color("magenta"))
        } else {
            Style::new().color(color("green"))
        };

        let mut line = Text::new("");
        line.append_styled(&format!("{:>3}. ", idx + 1), Style::new().dim());
        line.append_styled(&format!("{:<5} ", record.kind()), kind_style);
        line.append_styled(
            &format!("{:>4} ", format_age(record.updated_timestamp(), now)),
            Style::new().color(color("yellow")),
        );
        line.append_styled(
            &format!("#{} {} ", record.number, record.repository_name()),
            Style::new().bold().color(color("cyan")),
        );

        // prefix is 3 + 2 + 6 + 5 columns, plus the key
        let used = 16 + record.number.to_string().len() + record.repository_name().len() + 2;
        let title = match width {
            Some(cols) if cols > used => truncate_to_width(&record.title, cols - used),
            _ => record.title.clone(),
        };
        line.append(&title);

        console.print_renderable(&line);
    }
}

/// Render the post-sync summary line.
pub fn render_summary_rich(summary: &SyncSummary) {
    let console = Console::default();
    let mut text = Text::new("");
    text.append_styled("\u{2714} ", Style::new().color(color("green")));
    text.append_styled(&summary.describe(), Style::new().bold());
    if summary.added > 0 && !summary.bootstrapped {
        text.append_styled(
            &format!("  (+{} appended at the end)", summary.added),
            Style::new().dim(),
        );
    }
    console.print_renderable(&text);
}
