use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use triage_lib::{ReconcileStats, RefreshOutcome};

/// Result of a sync run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncSummary {
    pub org: String,
    pub snapshot: PathBuf,
    pub total: usize,
    pub kept: usize,
    pub added: usize,
    pub closed: usize,
    pub bootstrapped: bool,
}

impl SyncSummary {
    #[must_use]
    pub fn new(org: &str, snapshot: PathBuf, total: usize, stats: &ReconcileStats) -> Self {
        Self {
            org: org.to_string(),
            snapshot,
            total,
            kept: stats.kept,
            added: stats.added,
            closed: stats.pruned,
            bootstrapped: stats.bootstrapped,
        }
    }

    /// One-line human summary.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.bootstrapped {
            format!("{}: tracking {} open item(s)", self.org, self.total)
        } else {
            format!(
                "{}: {} open, {} new, {} closed since last sync",
                self.org, self.total, self.added, self.closed
            )
        }
    }
}

/// Result of a single-record refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshReport {
    pub id: u64,
    pub key: String,
    /// `updated`, `removed` or `not-tracked`.
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl RefreshReport {
    #[must_use]
    pub fn new(id: u64, key: String, outcome: RefreshOutcome) -> Self {
        let (label, index) = match outcome {
            RefreshOutcome::Updated { index } => ("updated", Some(index)),
            RefreshOutcome::Removed { index } => ("removed", Some(index)),
            RefreshOutcome::NotTracked => ("not-tracked", None),
        };
        Self {
            id,
            key,
            outcome: label.to_string(),
            index,
        }
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self.outcome.as_str() {
            "updated" => format!("Refreshed {}", self.key),
            "removed" => format!("{} is closed; removed from the list", self.key),
            _ => format!("{} is not in the cached list", self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_summary_describe() {
        let stats = ReconcileStats {
            kept: 8,
            added: 2,
            pruned: 3,
            bootstrapped: false,
        };
        let summary = SyncSummary::new("acme", PathBuf::from("acme-issues-prs.json"), 10, &stats);
        assert_eq!(summary.describe(), "acme: 10 open, 2 new, 3 closed since last sync");

        let first = SyncSummary::new(
            "acme",
            PathBuf::from("acme-issues-prs.json"),
            4,
            &ReconcileStats {
                added: 4,
                bootstrapped: true,
                ..ReconcileStats::default()
            },
        );
        assert_eq!(first.describe(), "acme: tracking 4 open item(s)");
    }

    #[test]
    fn test_refresh_report_json() {
        let report = RefreshReport::new(7, "api#3".to_string(), RefreshOutcome::Removed { index: 2 });
        insta::assert_json_snapshot!(report, @r#"
        {
          "id": 7,
          "key": "api#3",
          "outcome": "removed",
          "index": 2
        }
        "#);
        let untracked = RefreshReport::new(9, "api#9".to_string(), RefreshOutcome::NotTracked);
        assert_eq!(untracked.index, None);
        assert_eq!(untracked.describe(), "api#9 is not in the cached list");
    }
}
