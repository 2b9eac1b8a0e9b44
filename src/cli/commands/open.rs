//! Open command implementation.

use crate::cli::SelectorArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputContext;
use crate::util::open_in_browser;

/// Execute the open command.
///
/// In JSON mode the URL is printed instead of launched.
///
/// # Errors
///
/// Returns an error if the selector does not resolve or the browser cannot
/// be launched.
pub fn execute(args: &SelectorArgs, config: &Config, ctx: &OutputContext) -> Result<()> {
    let cache = super::open_cache(config)?;
    let record = cache.resolve(&args.selector)?;

    if ctx.is_json() {
        ctx.json(&serde_json::json!({
            "id": record.id,
            "key": record.display_key(),
            "url": record.html_url,
        }));
        return Ok(());
    }

    open_in_browser(&record.html_url)?;
    ctx.info(&format!("Opened {}", record.html_url));
    Ok(())
}
