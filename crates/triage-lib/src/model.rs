//! Core data types for triage-lib.
//!
//! Field names follow the GitHub REST payload so snapshots written by
//! older tooling load unchanged. Fields the tool never reads are kept in
//! `extra` and written back verbatim.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

static REPOSITORY_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/repos/(?P<owner>[^/]+)/(?P<name>[^/?#]+)/?$").expect("repository url regex")
});

/// Open/closed lifecycle of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordState {
    #[default]
    Open,
    Closed,
}

impl RecordState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relationship of an author to the organization owning the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorAssociation {
    Owner,
    Member,
    Collaborator,
    Mannequin,
    Contributor,
    FirstTimer,
    FirstTimeContributor,
    None,
    #[serde(untagged)]
    Custom(String),
}

impl AuthorAssociation {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Owner => "OWNER",
            Self::Member => "MEMBER",
            Self::Collaborator => "COLLABORATOR",
            Self::Mannequin => "MANNEQUIN",
            Self::Contributor => "CONTRIBUTOR",
            Self::FirstTimer => "FIRST_TIMER",
            Self::FirstTimeContributor => "FIRST_TIME_CONTRIBUTOR",
            Self::None => "NONE",
            Self::Custom(value) => value,
        }
    }

    /// Associations that mark an author as part of the organization.
    #[must_use]
    pub fn elevated() -> Vec<Self> {
        vec![Self::Owner, Self::Member, Self::Collaborator, Self::Mannequin]
    }
}

impl fmt::Display for AuthorAssociation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuthorAssociation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().replace('-', "_").as_str() {
            "OWNER" => Self::Owner,
            "MEMBER" => Self::Member,
            "COLLABORATOR" => Self::Collaborator,
            "MANNEQUIN" => Self::Mannequin,
            "CONTRIBUTOR" => Self::Contributor,
            "FIRST_TIMER" => Self::FirstTimer,
            "FIRST_TIME_CONTRIBUTOR" => Self::FirstTimeContributor,
            "NONE" => Self::None,
            other => Self::Custom(other.to_string()),
        })
    }
}

/// Author of a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct User {
    pub login: String,

    #[serde(default)]
    pub id: u64,

    /// Account type ("User", "Bot", "Organization").
    #[serde(rename = "type", default)]
    pub user_type: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Bot accounts are flagged by type or by the `[bot]` login suffix.
    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.user_type.eq_ignore_ascii_case("bot") || self.login.to_lowercase().ends_with("[bot]")
    }
}

/// One tracked issue or pull request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Record {
    /// Stable identity across refreshes.
    pub id: u64,

    /// Per-repository display number.
    pub number: u64,

    pub title: String,

    #[serde(default)]
    pub state: RecordState,

    /// Raw RFC 3339 timestamp, kept as a string so snapshots round-trip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub html_url: String,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "String::is_empty"
    )]
    pub repository_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_association: Option<AuthorAssociation>,

    /// Present only on pull requests. An explicit `null` is kept as
    /// `Some(Value::Null)` and does not mark a pull request.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(id: u64, number: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            number,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Last update time; missing or unparseable values sort as the epoch.
    #[must_use]
    pub fn updated_timestamp(&self) -> DateTime<Utc> {
        self.updated_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map_or(DateTime::<Utc>::UNIX_EPOCH, |dt| dt.with_timezone(&Utc))
    }

    /// Repository name, the last path segment of `repository_url`.
    #[must_use]
    pub fn repository_name(&self) -> &str {
        if let Some(caps) = REPOSITORY_URL.captures(&self.repository_url) {
            if let Some(name) = caps.name("name") {
                return name.as_str();
            }
        }
        self.repository_url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }

    /// Owner segment of `repository_url`, when the URL has the API shape.
    #[must_use]
    pub fn repository_owner(&self) -> Option<&str> {
        REPOSITORY_URL
            .captures(&self.repository_url)
            .and_then(|caps| caps.name("owner"))
            .map(|owner| owner.as_str())
    }

    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.as_ref().is_some_and(|value| !value.is_null())
    }

    /// Short kind label used in listings.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        if self.is_pull_request() { "pr" } else { "issue" }
    }

    /// `repo#number`, unique enough for humans.
    #[must_use]
    pub fn display_key(&self) -> String {
        format!("{}#{}", self.repository_name(), self.number)
    }
}

/// Deserialize a field that may be present with a `null` value.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
