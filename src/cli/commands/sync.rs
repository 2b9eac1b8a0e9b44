//! Sync command implementation.
//!
//! Loads the snapshot, fetches the organization's open items, reconciles,
//! persists and prints the resulting list.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use triage_lib::IssueCache;

use crate::cli::SyncArgs;
use crate::config::Config;
use crate::error::Result;
use crate::format::{SyncSummary, print_records, render_summary_rich};
use crate::github::GithubClient;
use crate::output::{OutputContext, OutputMode};

/// Execute the sync command.
///
/// On a fetch failure the cached list is still printed (as
/// `{"error", "records"}` in JSON mode), the snapshot is left as it was and
/// the error is returned.
///
/// # Errors
///
/// Returns an error if no organization is configured, the fetch fails or the
/// snapshot cannot be written.
pub fn execute(args: &SyncArgs, config: &Config, ctx: &OutputContext) -> Result<()> {
    let org = config.require_org()?;
    let mut cache = super::open_cache(config)?;
    let client = GithubClient::new(config)?;

    let spinner = make_spinner(ctx, org);
    let fetched = client.fetch_open_items(org, &config.author_filter(), &mut |count: usize| {
        spinner.set_message(format!("Fetching {org}: {count} item(s)"));
    });
    spinner.finish_and_clear();

    let fresh = match fetched {
        Ok(fresh) => fresh,
        Err(e) => {
            tracing::warn!(error = %e, org, "Fetch failed; showing cached list");
            if e.is_remote() {
                if ctx.is_json() {
                    ctx.json(&serde_json::json!({
                        "error": e.to_string(),
                        "records": cache.records(),
                    }));
                } else if !cache.is_empty() {
                    print_cached(&cache, org, ctx);
                }
            }
            return Err(e);
        }
    };

    let stats = cache.reconcile(&fresh);
    tracing::info!(
        org,
        kept = stats.kept,
        added = stats.added,
        pruned = stats.pruned,
        bootstrapped = stats.bootstrapped,
        "Reconciled snapshot"
    );

    let snapshot = config.snapshot_path()?;
    if args.dry_run {
        tracing::info!(path = %snapshot.display(), "Dry run; snapshot not written");
    } else if cache.is_dirty() || !snapshot.exists() {
        cache.save()?;
        tracing::debug!(path = %snapshot.display(), "Saved snapshot");
    }

    let summary = SyncSummary::new(org, snapshot, cache.len(), &stats);
    match ctx.mode() {
        OutputMode::Json => {
            ctx.json(&serde_json::json!({
                "summary": summary,
                "records": cache.records(),
            }));
        }
        OutputMode::Rich => {
            if !args.summary_only {
                print_cached(&cache, org, ctx);
            }
            if !ctx.is_quiet() {
                render_summary_rich(&summary);
            }
        }
        OutputMode::Plain => {
            if !args.summary_only {
                print_cached(&cache, org, ctx);
            }
            ctx.info(&summary.describe());
        }
    }

    Ok(())
}

fn print_cached(cache: &IssueCache, org: &str, ctx: &OutputContext) {
    let records: Vec<_> = cache.records().iter().collect();
    print_records(&records, &format!("Open issues and PRs for {org}"), ctx);
}

fn make_spinner(ctx: &OutputContext, org: &str) -> ProgressBar {
    if ctx.is_quiet() || ctx.is_json() || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Fetching {org}"));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
