//! Error types for the `triage` binary.
//!
//! Wraps library errors and adds the failure modes of the outer shell:
//! configuration, HTTP transport, GitHub API responses and the browser.

use thiserror::Error;
use triage_lib::TriageError;

/// Primary error type for CLI operations.
#[derive(Error, Debug)]
pub enum AppError {
    // === Core ===
    /// Snapshot or cache error from `triage-lib`.
    #[error(transparent)]
    Triage(#[from] TriageError),

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No organization configured.
    #[error("No organization configured: pass --org, set TRIAGE_ORG, or add `org:` to .triage/config.yaml")]
    MissingOrg,

    // === Remote Errors ===
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GitHub answered with a non-success status.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// GitHub rate limit exhausted.
    #[error("GitHub rate limit exceeded{}", reset_hint(*.reset_at))]
    RateLimited { reset_at: Option<i64> },

    /// A record's repository URL does not name an owner and repository.
    #[error("Cannot derive repository from URL: {url}")]
    InvalidRepositoryUrl { url: String },

    // === Presentation Errors ===
    /// Launching the browser failed.
    #[error("Failed to open browser: {0}")]
    Browser(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML config parse error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn reset_hint(reset_at: Option<i64>) -> String {
    reset_at
        .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        .map(|at| format!(" (resets at {})", at.format("%H:%M:%S UTC")))
        .unwrap_or_default()
}

impl AppError {
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    /// Errors after which the cached sequence is still trustworthy.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Api { .. } | Self::RateLimited { .. }
        )
    }
}

/// Result type using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_message() {
        let err = AppError::RateLimited {
            reset_at: Some(1_704_067_200),
        };
        assert_eq!(
            err.to_string(),
            "GitHub rate limit exceeded (resets at 00:00:00 UTC)"
        );
        assert_eq!(
            AppError::RateLimited { reset_at: None }.to_string(),
            "GitHub rate limit exceeded"
        );
    }

    #[test]
    fn test_remote_classification() {
        assert!(
            AppError::Api {
                status: 502,
                message: "Bad Gateway".to_string()
            }
            .is_remote()
        );
        assert!(!AppError::MissingOrg.is_remote());
    }
}
