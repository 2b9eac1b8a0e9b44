//! Refresh command implementation.
//!
//! Re-fetches one cached record. An open record is replaced in place, a
//! closed one is dropped; nothing else in the sequence moves.

use triage_lib::RefreshOutcome;

use crate::cli::SelectorArgs;
use crate::config::Config;
use crate::error::Result;
use crate::format::RefreshReport;
use crate::github::GithubClient;
use crate::output::OutputContext;

/// Execute the refresh command.
///
/// # Errors
///
/// Returns an error if the selector does not resolve, the fetch fails or the
/// snapshot cannot be written. The snapshot is only written after a
/// successful fetch.
pub fn execute(args: &SelectorArgs, config: &Config, ctx: &OutputContext) -> Result<()> {
    let org = config.require_org()?;
    let mut cache = super::open_cache(config)?;
    let target = cache.resolve(&args.selector)?.clone();
    let key = target.display_key();

    let client = GithubClient::new(config)?;
    let refreshed = client.fetch_record(&target, org).inspect_err(|e| {
        tracing::warn!(error = %e, key = %key, "Refresh failed; cached list unchanged");
    })?;

    let outcome = cache.apply_refresh(refreshed);
    if outcome != RefreshOutcome::NotTracked {
        cache.save()?;
    }
    tracing::info!(key = %key, ?outcome, "Refreshed record");

    let report = RefreshReport::new(target.id, key, outcome);
    if ctx.is_json() {
        ctx.json(&report);
    } else {
        ctx.info(&report.describe());
    }
    Ok(())
}
