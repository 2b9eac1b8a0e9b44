//! Output mode selection.
//!
//! Robot-friendly JSON when asked for, rich colour on an interactive
//! terminal, plain text otherwise (pipes, tests).

use std::io::IsTerminal;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Plain,
    Rich,
    Json,
}

/// Where and how command results are printed.
#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    mode: OutputMode,
    quiet: bool,
}

impl OutputContext {
    #[must_use]
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        let mode = if json {
            OutputMode::Json
        } else if std::io::stdout().is_terminal() {
            OutputMode::Rich
        } else {
            OutputMode::Plain
        };
        Self { mode, quiet }
    }

    #[must_use]
    pub const fn mode(&self) -> OutputMode {
        self.mode
    }

    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.mode, OutputMode::Json)
    }

    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a value as pretty JSON on stdout.
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::error!(error = %e, "Failed to serialize output"),
        }
    }

    /// Print an informational line unless quiet or in JSON mode.
    pub fn info(&self, message: &str) {
        if !self.quiet && !self.is_json() {
            println!("{message}");
        }
    }
}
