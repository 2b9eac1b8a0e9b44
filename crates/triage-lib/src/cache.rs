//! In-memory record cache backed by a JSON snapshot.
//!
//! Owns the current canonical sequence. Use `open()` to load a snapshot,
//! `reconcile()` to fold in a fresh fetch, `apply_refresh()` for a
//! single-record update and `save()` to persist.

use std::path::{Path, PathBuf};

use crate::error::{Result, TriageError};
use crate::model::Record;
use crate::reconcile::{ReconcileStats, Reconciler};
use crate::snapshot;

/// What a single-record refresh did to the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Still open; replaced at `index`.
    Updated { index: usize },
    /// Now closed; removed from `index`.
    Removed { index: usize },
    /// The id is not in the cache; nothing changed.
    NotTracked,
}

/// Cached issue/PR sequence.
#[derive(Debug, Clone, Default)]
pub struct IssueCache {
    records: Vec<Record>,
    path: Option<PathBuf>,
    reconciler: Reconciler,
    dirty: bool,
}

impl IssueCache {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create a new empty cache with no backing file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding `records`, with no backing file.
    #[must_use]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Open a snapshot. Missing or corrupt snapshots yield an empty cache.
    ///
    /// A corrupt snapshot also marks the cache dirty so the next save
    /// replaces it, even when the reconciled sequence stays empty.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let (records, dirty) = match snapshot::load(path) {
            Ok(records) => {
                tracing::debug!(path = %path.display(), count = records.len(), "Loaded snapshot");
                (records, false)
            }
            Err(e) if e.is_missing_snapshot() => {
                tracing::debug!(path = %path.display(), "No snapshot yet");
                (Vec::new(), false)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable snapshot");
                (Vec::new(), true)
            }
        };
        Self {
            records,
            path: Some(path.to_path_buf()),
            dirty,
            ..Self::default()
        }
    }

    /// Open a snapshot, surfacing read and parse errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not a record array.
    pub fn open_strict(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Ok(Self {
            records: snapshot::load(path)?,
            path: Some(path.to_path_buf()),
            ..Self::default()
        })
    }

    /// Use `reconciler` for subsequent reconciliations.
    #[must_use]
    pub fn with_reconciler(mut self, reconciler: Reconciler) -> Self {
        self.reconciler = reconciler;
        self
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Save to the file that was opened.
    ///
    /// # Errors
    ///
    /// Returns `Io` if no file path is set or on write failure.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or_else(|| {
            TriageError::Io(std::io::Error::other("no snapshot path set; use save_to()"))
        })?;
        self.save_to(&path)
    }

    /// Save to a specific file path.
    ///
    /// # Errors
    ///
    /// Returns `Io` on write failure.
    pub fn save_to(&mut self, path: impl AsRef<Path>) -> Result<()> {
        snapshot::save(path.as_ref(), &self.records)?;
        self.dirty = false;
        Ok(())
    }

    // ========================================================================
    // Updates
    // ========================================================================

    /// Replace the sequence with its reconciliation against `fresh`.
    pub fn reconcile(&mut self, fresh: &[Record]) -> ReconcileStats {
        let (merged, stats) = self.reconciler.reconcile_with_stats(&self.records, fresh);
        if merged != self.records {
            self.dirty = true;
        }
        self.records = merged;
        stats
    }

    /// Fold a re-fetched record into the sequence.
    ///
    /// Only the record with the same id is touched: replaced in place when
    /// open, removed when closed. Untracked ids are ignored.
    pub fn apply_refresh(&mut self, refreshed: Record) -> RefreshOutcome {
        let Some(index) = self.position(refreshed.id) else {
            tracing::debug!(id = refreshed.id, "Refreshed record is not cached");
            return RefreshOutcome::NotTracked;
        };

        self.dirty = true;
        if refreshed.state.is_closed() {
            let removed = self.records.remove(index);
            tracing::info!(id = removed.id, key = %removed.display_key(), "Dropped closed record");
            RefreshOutcome::Removed { index }
        } else {
            self.records[index] = refreshed;
            RefreshOutcome::Updated { index }
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    /// Resolve a user-supplied selector to a cached record.
    ///
    /// Accepted forms: `#123` (number), `repo#123` (repository and number),
    /// or a bare integer, tried as an id first and then as a number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSelector` for malformed input, `RecordNotFound` when
    /// nothing matches, or `AmbiguousNumber` when a number exists in several
    /// repositories.
    pub fn resolve(&self, selector: &str) -> Result<&Record> {
        let selector = selector.trim();
        let invalid = || TriageError::InvalidSelector {
            input: selector.to_string(),
        };

        if let Some((repo, number)) = selector.split_once('#') {
            let number: u64 = number.parse().map_err(|_| invalid())?;
            let repo = repo.trim();
            let candidates: Vec<&Record> = self
                .records
                .iter()
                .filter(|record| {
                    record.number == number
                        && (repo.is_empty() || record.repository_name().eq_ignore_ascii_case(repo))
                })
                .collect();
            return Self::single(selector, number, candidates);
        }

        let value: u64 = selector.parse().map_err(|_| invalid())?;
        if let Some(record) = self.get(value) {
            return Ok(record);
        }
        let candidates: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| record.number == value)
            .collect();
        Self::single(selector, value, candidates)
    }

    fn single<'a>(selector: &str, number: u64, candidates: Vec<&'a Record>) -> Result<&'a Record> {
        match candidates.as_slice() {
            [] => Err(TriageError::not_found(selector)),
            [record] => Ok(*record),
            many => Err(TriageError::AmbiguousNumber {
                number,
                matches: many.iter().map(|record| record.display_key()).collect(),
            }),
        }
    }

    // ========================================================================
    // Dirty tracking
    // ========================================================================

    /// Whether the sequence changed since it was loaded or last saved.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
