//! Output formatting for `gh-triage`.
//!
//! Supports plain text, rich terminal output and machine-parseable JSON.
//!
//! # JSON Output Types
//!
//! - [`SyncSummary`] - Reconciliation counts (sync)
//! - [`RefreshReport`] - Single-record refresh result (refresh)
//!
//! Listings in JSON mode are the records themselves, in snapshot shape.

mod output;
mod rich;
mod text;

pub use output::{RefreshReport, SyncSummary};
pub use rich::{render_records_rich, render_summary_rich};
pub use text::{
    format_age, format_kind_badge, format_record_line, format_record_description,
    terminal_width, truncate_to_width,
};

use crate::output::{OutputContext, OutputMode};
use triage_lib::Record;

/// Print a record listing in the context's mode.
pub fn print_records(records: &[&Record], heading: &str, ctx: &OutputContext) {
    match ctx.mode() {
        OutputMode::Json => ctx.json(&records),
        OutputMode::Rich => render_records_rich(records, heading),
        OutputMode::Plain => {
            if records.is_empty() {
                println!("No open issues or PRs found.");
                return;
            }
            let width = terminal_width();
            for (idx, record) in records.iter().enumerate() {
                let line = format!("{:>3}. {}", idx + 1, format_record_line(record));
                match width {
                    Some(max) => println!("{}", truncate_to_width(&line, max)),
                    None => println!("{line}"),
                }
            }
            if !ctx.is_quiet() {
                println!("\n{} item(s)", records.len());
            }
        }
    }
}
