//! Command implementations.

pub mod completions;
pub mod list;
pub mod open;
pub mod refresh;
pub mod show;
pub mod sync;
pub mod version;

use triage_lib::IssueCache;

use crate::config::Config;
use crate::error::Result;

/// Open the organization's snapshot with the configured reconciler.
///
/// # Errors
///
/// Returns `MissingOrg` when no organization is configured.
pub fn open_cache(config: &Config) -> Result<IssueCache> {
    let path = config.snapshot_path()?;
    let cache = IssueCache::open(&path).with_reconciler(config.reconciler());
    tracing::debug!(path = %path.display(), records = cache.len(), "Opened snapshot");
    Ok(cache)
}
