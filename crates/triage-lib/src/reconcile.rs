//! Snapshot reconciliation.
//!
//! Merges the cached record sequence with a freshly fetched one:
//! - cached records still present upstream keep their position and take
//!   the fresh value wholesale
//! - cached records missing upstream are dropped
//! - records new upstream are appended in fetch order
//! - an empty cache is seeded with a bootstrap ordering instead
//!
//! Inputs are never mutated; the output is a newly built vector.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::Record;

/// Ordering used when there is no cached sequence to preserve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BootstrapOrder {
    /// Oldest, newest, second oldest, second newest, ...
    #[default]
    Interleaved,
    /// Ascending by `updated_at`.
    OldestFirst,
    /// Descending by `updated_at`.
    NewestFirst,
    /// Fetch order, untouched.
    AsFetched,
}

impl BootstrapOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interleaved => "interleaved",
            Self::OldestFirst => "oldest-first",
            Self::NewestFirst => "newest-first",
            Self::AsFetched => "as-fetched",
        }
    }

    /// Order `fresh` for a first population.
    #[must_use]
    pub fn arrange(self, fresh: &[Record]) -> Vec<Record> {
        match self {
            Self::AsFetched => fresh.to_vec(),
            Self::OldestFirst => sorted_by_update(fresh).into_iter().cloned().collect(),
            Self::NewestFirst => {
                // Stable descending: equal timestamps keep fetch order.
                let mut sorted: Vec<&Record> = fresh.iter().collect();
                sorted.sort_by(|a, b| b.updated_timestamp().cmp(&a.updated_timestamp()));
                sorted.into_iter().cloned().collect()
            }
            Self::Interleaved => interleave_ends(&sorted_by_update(fresh)),
        }
    }
}

impl fmt::Display for BootstrapOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BootstrapOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "interleaved" | "alternating" => Ok(Self::Interleaved),
            "oldest-first" | "oldest" => Ok(Self::OldestFirst),
            "newest-first" | "newest" => Ok(Self::NewestFirst),
            "as-fetched" | "fetched" => Ok(Self::AsFetched),
            other => Err(format!(
                "unknown bootstrap order '{other}' (expected interleaved, oldest-first, newest-first, as-fetched)"
            )),
        }
    }
}

/// Counts describing what a reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReconcileStats {
    /// Cached records that survived with refreshed values.
    pub kept: usize,
    /// Records appended (or seeded, on bootstrap).
    pub added: usize,
    /// Cached records absent from the fresh sequence.
    pub pruned: usize,
    /// Whether the empty-cache branch ran.
    pub bootstrapped: bool,
}

/// Reconciler with a configurable bootstrap policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    bootstrap: BootstrapOrder,
}

impl Reconciler {
    #[must_use]
    pub const fn new(bootstrap: BootstrapOrder) -> Self {
        Self { bootstrap }
    }

    #[must_use]
    pub const fn bootstrap_order(&self) -> BootstrapOrder {
        self.bootstrap
    }

    /// Produce the new canonical sequence from `cached` and `fresh`.
    #[must_use]
    pub fn reconcile(&self, cached: &[Record], fresh: &[Record]) -> Vec<Record> {
        self.reconcile_with_stats(cached, fresh).0
    }

    /// Same as [`Reconciler::reconcile`], also reporting what changed.
    #[must_use]
    pub fn reconcile_with_stats(
        &self,
        cached: &[Record],
        fresh: &[Record],
    ) -> (Vec<Record>, ReconcileStats) {
        if cached.is_empty() {
            let seeded = self.bootstrap.arrange(fresh);
            let stats = ReconcileStats {
                kept: 0,
                added: seeded.len(),
                pruned: 0,
                bootstrapped: true,
            };
            tracing::debug!(
                order = %self.bootstrap,
                count = seeded.len(),
                "Seeded empty cache"
            );
            return (seeded, stats);
        }

        // Later duplicates overwrite earlier ones.
        let fresh_by_id: HashMap<u64, &Record> =
            fresh.iter().map(|record| (record.id, record)).collect();
        let mut processed: HashSet<u64> = HashSet::with_capacity(cached.len());

        let mut merged = Vec::with_capacity(fresh.len());
        let mut pruned = 0;
        for cached_record in cached {
            if let Some(fresh_record) = fresh_by_id.get(&cached_record.id) {
                processed.insert(cached_record.id);
                merged.push((*fresh_record).clone());
            } else {
                pruned += 1;
            }
        }
        let kept = merged.len();

        merged.extend(
            fresh
                .iter()
                .filter(|record| !processed.contains(&record.id))
                .cloned(),
        );

        let stats = ReconcileStats {
            kept,
            added: merged.len() - kept,
            pruned,
            bootstrapped: false,
        };
        tracing::debug!(
            kept = stats.kept,
            added = stats.added,
            pruned = stats.pruned,
            "Reconciled cache"
        );
        (merged, stats)
    }
}

/// Reconcile with the default (interleaved) bootstrap order.
#[must_use]
pub fn reconcile(cached: &[Record], fresh: &[Record]) -> Vec<Record> {
    Reconciler::default().reconcile(cached, fresh)
}

/// Stable ascending sort by `updated_at`; missing timestamps come first.
fn sorted_by_update(records: &[Record]) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by_key(|record| record.updated_timestamp());
    sorted
}

/// `s[0], s[n-1], s[1], s[n-2], ...`, placing a lone middle element once.
fn interleave_ends(sorted: &[&Record]) -> Vec<Record> {
    let mut out = Vec::with_capacity(sorted.len());
    let (mut start, mut end) = (0, sorted.len());
    while start < end {
        out.push(sorted[start].clone());
        start += 1;
        if start < end {
            end -= 1;
            out.push(sorted[end].clone());
        }
    }
    out
}
