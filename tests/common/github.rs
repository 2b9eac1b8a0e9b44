use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock GitHub REST API for driving the `triage` binary end to end.
///
/// The server runs on its own tokio runtime so tests stay synchronous, like
/// the binary itself.
pub struct MockGithub {
    server: MockServer,
    runtime: Runtime,
}

pub fn search_query(org: &str, kind: &str) -> String {
    format!("org:{org} type:{kind} state:open archived:false")
}

impl MockGithub {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("tokio runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Serve one page of `/search/issues` for `kind` ("issue" or "pr").
    pub fn mount_search_page(&self, org: &str, kind: &str, page: u32, total: usize, items: &[Value]) {
        let body = json!({
            "total_count": total,
            "incomplete_results": false,
            "items": items,
        });
        self.runtime.block_on(
            Mock::given(method("GET"))
                .and(path("/search/issues"))
                .and(query_param("q", search_query(org, kind)))
                .and(query_param("page", page.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&self.server),
        );
    }

    /// Serve `GET /repos/{owner}/{repo}/issues/{number}`.
    pub fn mount_issue(&self, owner: &str, repo: &str, number: u64, body: &Value) {
        self.runtime.block_on(
            Mock::given(method("GET"))
                .and(path(format!("/repos/{owner}/{repo}/issues/{number}")))
                .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
                .mount(&self.server),
        );
    }

    /// `page` values requested for one search query, in request order.
    pub fn requested_pages(&self, org: &str, kind: &str) -> Vec<String> {
        let query = search_query(org, kind);
        let requests = self
            .runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default();
        requests
            .iter()
            .filter(|request| request.url.path() == "/search/issues")
            .filter(|request| {
                request
                    .url
                    .query_pairs()
                    .any(|(key, value)| key == "q" && value == query.as_str())
            })
            .filter_map(|request| {
                request
                    .url
                    .query_pairs()
                    .find(|(key, _)| key == "page")
                    .map(|(_, value)| value.into_owned())
            })
            .collect()
    }
}
