//! GitHub REST client.
//!
//! Fetches the open issues and pull requests of an organization through the
//! search API, and re-fetches single records. Blocking, like the rest of
//! the CLI.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, HeaderMap};
use serde::Deserialize;
use triage_lib::{AuthorFilter, Record};

use crate::config::Config;
use crate::error::{AppError, Result};

const USER_AGENT: &str = concat!("gh-triage/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The search API never returns more than this many results per query.
pub const SEARCH_RESULT_CAP: usize = 1000;

/// Which half of the combined fetch a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Issue,
    PullRequest,
}

impl ItemKind {
    #[must_use]
    pub const fn qualifier(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::PullRequest => "pr",
        }
    }
}

/// Search query for open, non-archived items of one kind in `org`.
#[must_use]
pub fn search_query(org: &str, kind: ItemKind) -> String {
    format!(
        "org:{org} type:{} state:open archived:false",
        kind.qualifier()
    )
}

/// Whether another search page is worth requesting.
#[must_use]
pub fn should_fetch_next(page_len: usize, per_page: usize, fetched: usize, total: usize) -> bool {
    page_len == per_page && fetched < total && fetched < SEARCH_RESULT_CAP
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    total_count: usize,
    #[serde(default)]
    incomplete_results: bool,
    items: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Blocking GitHub API client.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
    per_page: u32,
}

impl GithubClient {
    /// Build a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns `Http` if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.api_url, config.token.clone(), config.per_page)
    }

    /// Build a client against an explicit API root.
    ///
    /// # Errors
    ///
    /// Returns `Http` if the HTTP client cannot be constructed.
    pub fn with_base_url(api_url: &str, token: Option<String>, per_page: u32) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        if token.is_none() {
            tracing::info!("No GitHub token configured; using unauthenticated rate limits");
        }
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            per_page: per_page.clamp(1, 100),
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// All open items of one kind, newest-updated first, across pages.
    ///
    /// `on_page` is called with the running item count after each page.
    ///
    /// # Errors
    ///
    /// Returns `Http`, `Api` or `RateLimited` on the first failing page.
    pub fn search_open(
        &self,
        org: &str,
        kind: ItemKind,
        on_page: &mut dyn FnMut(usize),
    ) -> Result<Vec<Record>> {
        let url = format!("{}/search/issues", self.api_url);
        let query = search_query(org, kind);
        let per_page = self.per_page.to_string();
        let mut items = Vec::new();

        for page in 1.. {
            let page_param = page.to_string();
            let response = self
                .get(&url)
                .query(&[
                    ("q", query.as_str()),
                    ("sort", "updated"),
                    ("order", "desc"),
                    ("per_page", per_page.as_str()),
                    ("page", page_param.as_str()),
                ])
                .send()?;
            let body: SearchPage = check(response)?.json()?;

            if body.incomplete_results {
                tracing::warn!(page, kind = kind.qualifier(), "GitHub returned incomplete search results");
            }
            let page_len = body.items.len();
            items.extend(body.items);
            on_page(items.len());
            tracing::debug!(page, page_len, total = body.total_count, kind = kind.qualifier(), "Fetched search page");

            if !should_fetch_next(page_len, self.per_page as usize, items.len(), body.total_count) {
                break;
            }
        }

        if items.len() >= SEARCH_RESULT_CAP {
            tracing::warn!(
                kind = kind.qualifier(),
                "Search result cap reached; older items are not tracked"
            );
        }
        Ok(items)
    }

    /// Open issues and pull requests of `org`, filtered by author, newest first.
    ///
    /// # Errors
    ///
    /// Returns the first error from either search.
    pub fn fetch_open_items(
        &self,
        org: &str,
        filter: &AuthorFilter,
        on_page: &mut dyn FnMut(usize),
    ) -> Result<Vec<Record>> {
        let mut records = self.search_open(org, ItemKind::Issue, on_page)?;
        let issues = records.len();
        let mut with_issues = |n: usize| on_page(issues + n);
        records.extend(self.search_open(org, ItemKind::PullRequest, &mut with_issues)?);

        filter.retain(&mut records);
        records.sort_by(|a, b| b.updated_timestamp().cmp(&a.updated_timestamp()));
        tracing::info!(org, count = records.len(), "Fetched open items");
        Ok(records)
    }

    /// Re-fetch one record by its repository and number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepositoryUrl` if the record's repository cannot be
    /// determined, or `Http` / `Api` / `RateLimited` on request failure.
    pub fn fetch_record(&self, record: &Record, org: &str) -> Result<Record> {
        let url = self.record_url(record, org)?;
        let response = self.get(&url).send()?;
        let refreshed: Record = check(response)?.json()?;
        tracing::debug!(id = refreshed.id, state = %refreshed.state, "Fetched record");
        Ok(refreshed)
    }

    fn record_url(&self, record: &Record, org: &str) -> Result<String> {
        let repo = record.repository_name();
        if repo.is_empty() {
            return Err(AppError::InvalidRepositoryUrl {
                url: record.repository_url.clone(),
            });
        }
        let owner = record.repository_owner().unwrap_or(org);
        Ok(format!(
            "{}/repos/{owner}/{repo}/issues/{}",
            self.api_url, record.number
        ))
    }
}

/// Turn non-success responses into typed errors.
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let headers = response.headers().clone();
    if is_rate_limited(status, &headers) {
        let reset_at = header_i64(&headers, "x-ratelimit-reset");
        return Err(AppError::RateLimited { reset_at });
    }

    let body = response.text().unwrap_or_default();
    Err(AppError::Api {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}

fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN
            && header_i64(headers, "x-ratelimit-remaining") == Some(0))
}

fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

/// GitHub error bodies carry a `message`; fall back to the status text.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body).map_or_else(
        |_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        },
        |parsed| parsed.message,
    )
}
