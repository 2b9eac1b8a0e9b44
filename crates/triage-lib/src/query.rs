//! Filter types for record listings and fetch results.

use crate::model::{AuthorAssociation, Record};

/// Case-insensitive text search over title, repository name and number.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    #[must_use]
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| trimmed.to_lowercase()),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    /// The normalized query, empty when unfiltered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.needle.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };
        record.title.to_lowercase().contains(needle)
            || record.repository_name().to_lowercase().contains(needle)
            || record.number.to_string().contains(needle)
    }

    /// Matching records, in sequence order.
    #[must_use]
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// Drops records authored by bots or by members of the organization.
#[derive(Debug, Clone)]
pub struct AuthorFilter {
    pub exclude_bots: bool,
    pub excluded_associations: Vec<AuthorAssociation>,
}

impl Default for AuthorFilter {
    fn default() -> Self {
        Self {
            exclude_bots: true,
            excluded_associations: AuthorAssociation::elevated(),
        }
    }
}

impl AuthorFilter {
    /// A filter that keeps everything.
    #[must_use]
    pub const fn allow_all() -> Self {
        Self {
            exclude_bots: false,
            excluded_associations: Vec::new(),
        }
    }

    /// Whether a record should be tracked. Records without an author are kept.
    #[must_use]
    pub fn keeps(&self, record: &Record) -> bool {
        let Some(user) = record.user.as_ref() else {
            return true;
        };
        if self.exclude_bots && user.is_bot() {
            return false;
        }
        !record
            .author_association
            .as_ref()
            .is_some_and(|assoc| self.excluded_associations.contains(assoc))
    }

    /// Retain only the records this filter keeps.
    pub fn retain(&self, records: &mut Vec<Record>) {
        let before = records.len();
        records.retain(|record| self.keeps(record));
        tracing::debug!(
            dropped = before - records.len(),
            kept = records.len(),
            "Applied author filter"
        );
    }
}
