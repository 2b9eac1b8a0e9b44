//! Logging setup for `gh-triage`.
//!
//! Diagnostics go to stderr so stdout stays clean for list and JSON output.
//! `RUST_LOG` overrides the verbosity flags.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TEST_INIT: Once = Once::new();

/// Filter directive for the given verbosity flags.
#[must_use]
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber.
///
/// `json` switches to one JSON object per log line.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(
    verbose: u8,
    quiet: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose > 1);

    if json {
        builder.json().try_init()
    } else {
        builder.without_time().try_init()
    }
}

/// Initialize logging for tests (once, only when `RUST_LOG` is set).
pub fn init_test_logging() {
    TEST_INIT.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_test_writer()
                .with_env_filter(EnvFilter::from_default_env())
                .try_init()
                .ok();
        }
    });
}
