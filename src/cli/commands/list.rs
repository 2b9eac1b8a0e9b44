//! List command implementation.
//!
//! Prints the cached sequence in snapshot order, optionally narrowed by a
//! search query. Never touches the network.

use triage_lib::SearchFilter;

use crate::cli::ListArgs;
use crate::config::Config;
use crate::error::Result;
use crate::format::print_records;
use crate::output::OutputContext;

/// Execute the list command.
///
/// # Errors
///
/// Returns `MissingOrg` if no organization is configured.
pub fn execute(args: &ListArgs, config: &Config, ctx: &OutputContext) -> Result<()> {
    let org = config.require_org()?;
    let cache = super::open_cache(config)?;

    if cache.is_empty() && cache.path().is_some_and(|path| !path.exists()) {
        if ctx.is_json() {
            ctx.json(&Vec::<()>::new());
        } else {
            ctx.info(&format!(
                "No snapshot for {org} yet. Run `triage sync` to fetch open issues and PRs."
            ));
        }
        return Ok(());
    }

    let filter = SearchFilter::new(&args.query.join(" "));
    let mut records = filter.apply(cache.records());
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }
    tracing::debug!(
        query = filter.as_str(),
        matched = records.len(),
        total = cache.len(),
        "Filtered list"
    );

    let heading = if filter.is_empty() {
        format!("Open issues and PRs for {org}")
    } else {
        format!("Matching \"{}\" in {org}", filter.as_str())
    };
    print_records(&records, &heading, ctx);
    Ok(())
}
