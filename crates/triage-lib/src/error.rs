//! Error types for `triage-lib`.
//!
//! Reconciliation itself never fails; these cover snapshot I/O and
//! record lookups on the in-memory cache.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for triage-lib operations.
#[derive(Error, Debug)]
pub enum TriageError {
    // === Record Errors ===
    /// No cached record matches the given id or number.
    #[error("Record not found: {key}")]
    RecordNotFound { key: String },

    /// A bare number matches records in several repositories.
    #[error("Ambiguous number #{number}: matches {matches:?}")]
    AmbiguousNumber { number: u64, matches: Vec<String> },

    /// Record selector is neither an id nor `#number` / `repo#number`.
    #[error("Invalid record selector: {input}")]
    InvalidSelector { input: String },

    // === Snapshot Errors ===
    /// The snapshot file is not a JSON array of records.
    #[error("Snapshot parse error in {path}: {reason}")]
    SnapshotParse { path: PathBuf, reason: String },

    /// File not found at the specified path.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TriageError {
    #[must_use]
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::RecordNotFound { key: key.into() }
    }

    /// True for errors that mean "there is no usable snapshot yet".
    #[must_use]
    pub const fn is_missing_snapshot(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }
}

/// Result type using `TriageError`.
pub type Result<T> = std::result::Result<T, TriageError>;
