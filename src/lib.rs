//! `gh-triage` - Issue/PR triage cache for a GitHub organization
//!
//! This crate provides the `triage` CLI: it keeps a local snapshot of the
//! open issues and pull requests of an organization and reconciles it with
//! fresh fetches while keeping a stable order across runs.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered YAML/env configuration
//! - [`error`] - Error types and handling
//! - [`format`] - Output formatting (text, rich, JSON)
//! - [`github`] - GitHub search and issue API client
//! - [`logging`] - `tracing` subscriber setup
//! - [`output`] - Output mode selection
//! - [`util`] - Utility functions (browser launch)
//!
//! Reconciliation, persistence and filtering live in `triage-lib`.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod github;
pub mod logging;
pub mod output;
pub mod util;

pub use error::{AppError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if configuration, fetching or persistence fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
