//! Utility functions for `gh-triage`.
//!
//! - Browser launch ([`browser`])

pub mod browser;

pub use browser::{open_in_browser, opener_for_os};
