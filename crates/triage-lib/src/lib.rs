//! `triage-lib` - issue/PR snapshot reconciliation.
//!
//! Keeps a locally cached list of GitHub issues and pull requests in a
//! stable, user-meaningful order while it is refreshed from upstream.
//! Pure data handling only: fetching and rendering live in the binary.
//!
//! # Quick Start
//!
//! ```no_run
//! use triage_lib::{IssueCache, Record};
//!
//! // Load the last snapshot (missing or corrupt files load as empty)
//! let mut cache = IssueCache::open("acme-issues-prs.json");
//!
//! // Fold in a fresh fetch
//! let fresh: Vec<Record> = Vec::new();
//! let stats = cache.reconcile(&fresh);
//! println!("{} kept, {} new, {} closed", stats.kept, stats.added, stats.pruned);
//!
//! // Save back
//! cache.save().unwrap();
//! ```

pub mod cache;
pub mod error;
pub mod model;
pub mod query;
pub mod reconcile;
pub mod snapshot;

pub use cache::{IssueCache, RefreshOutcome};
pub use error::{Result, TriageError};
pub use model::{AuthorAssociation, Record, RecordState, User};
pub use query::{AuthorFilter, SearchFilter};
pub use reconcile::{BootstrapOrder, ReconcileStats, Reconciler, reconcile};
