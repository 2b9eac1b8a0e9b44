#![allow(dead_code)]

pub mod cli;
pub mod github;

use serde_json::{Value, json};

/// A search-API shaped record for snapshot fixtures.
pub fn record(id: u64, number: u64, repo: &str, title: &str, updated_at: &str) -> Value {
    json!({
        "id": id,
        "number": number,
        "title": title,
        "state": "open",
        "updated_at": updated_at,
        "html_url": format!("https://github.com/acme/{repo}/issues/{number}"),
        "repository_url": format!("https://api.github.com/repos/acme/{repo}"),
        "user": {"login": "octocat", "id": 1, "type": "User"},
        "author_association": "CONTRIBUTOR",
        "labels": [{"name": "bug"}],
        "comments": 2
    })
}

/// Same as [`record`], shaped as a pull request.
pub fn pull_request(id: u64, number: u64, repo: &str, title: &str, updated_at: &str) -> Value {
    let mut item = record(id, number, repo, title, updated_at);
    item["html_url"] = json!(format!("https://github.com/acme/{repo}/pull/{number}"));
    item["pull_request"] = json!({
        "url": format!("https://api.github.com/repos/acme/{repo}/pulls/{number}")
    });
    item
}

/// Same as [`record`], authored by a bot account.
pub fn bot_record(id: u64, number: u64, repo: &str, title: &str, updated_at: &str) -> Value {
    let mut item = record(id, number, repo, title, updated_at);
    item["user"] = json!({"login": "dependabot[bot]", "id": 49_699_333, "type": "Bot"});
    item
}

/// Same as [`record`], authored by an organization member.
pub fn member_record(id: u64, number: u64, repo: &str, title: &str, updated_at: &str) -> Value {
    let mut item = record(id, number, repo, title, updated_at);
    item["author_association"] = json!("MEMBER");
    item
}
