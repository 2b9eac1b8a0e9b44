//! Show command implementation.

use chrono::Utc;
use triage_lib::Record;

use crate::cli::SelectorArgs;
use crate::config::Config;
use crate::error::Result;
use crate::format::{format_age, format_kind_badge, format_record_description};
use crate::output::OutputContext;

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the selector does not resolve to exactly one cached
/// record.
pub fn execute(args: &SelectorArgs, config: &Config, ctx: &OutputContext) -> Result<()> {
    let cache = super::open_cache(config)?;
    let record = cache.resolve(&args.selector)?;

    if ctx.is_json() {
        ctx.json(record);
        return Ok(());
    }

    for line in detail_lines(record) {
        println!("{line}");
    }
    Ok(())
}

fn detail_lines(record: &Record) -> Vec<String> {
    let mut lines = vec![
        format!("{} {}", format_kind_badge(record), record.title),
        format_record_description(record),
    ];

    let mut status = format!("state: {}", record.state);
    if let Some(updated) = &record.updated_at {
        let age = format_age(record.updated_timestamp(), Utc::now());
        status.push_str(&format!("  updated: {updated} ({age} ago)"));
    }
    lines.push(status);

    if let Some(user) = &record.user {
        match &record.author_association {
            Some(assoc) => lines.push(format!("author: {} ({})", user.login, assoc.as_str())),
            None => lines.push(format!("author: {}", user.login)),
        }
    }
    if !record.html_url.is_empty() {
        lines.push(record.html_url.clone());
    }
    lines
}
