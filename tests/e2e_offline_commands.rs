mod common;
use common::cli::{TriageWorkspace, run_triage, triage_command};
use common::record;
use predicates::prelude::*;

fn seeded() -> (TriageWorkspace, std::path::PathBuf) {
    let workspace = TriageWorkspace::with_org("acme");
    // Snapshot order is deliberately not time order.
    let path = workspace.seed_snapshot(
        "acme",
        &[
            record(300, 7, "api", "Webhook retries fail", "2024-03-01T00:00:00Z"),
            record(100, 12, "docs", "Typo in quickstart", "2024-01-01T00:00:00Z"),
            record(200, 7, "sdk", "Add Go client", "2024-05-01T00:00:00Z"),
        ],
    );
    (workspace, path)
}

#[test]
fn test_list_keeps_snapshot_order() {
    let (workspace, _) = seeded();
    let list = run_triage(&workspace, ["list"], "list");
    assert!(list.status.success(), "list failed: {}", list.stderr);

    let lines: Vec<&str> = list.stdout.lines().take(3).collect();
    assert_eq!(
        lines,
        vec![
            "  1. issue #7 api  Webhook retries fail",
            "  2. issue #12 docs  Typo in quickstart",
            "  3. issue #7 sdk  Add Go client",
        ]
    );
    assert!(list.stdout.contains("3 item(s)"));
}

#[test]
fn test_list_filters_by_query() {
    let (workspace, _) = seeded();
    let list = run_triage(&workspace, ["list", "QUICKSTART"], "list_query");
    assert!(list.status.success(), "list failed: {}", list.stderr);
    assert!(list.stdout.contains("Typo in quickstart"));
    assert!(!list.stdout.contains("Webhook"));

    let by_repo = run_triage(&workspace, ["ls", "sdk", "--json"], "list_repo");
    let parsed: serde_json::Value = serde_json::from_str(&by_repo.stdout).expect("json list");
    let ids: Vec<u64> = parsed
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|item| item["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![200]);
}

#[test]
fn test_list_without_snapshot_hints_sync() {
    let workspace = TriageWorkspace::with_org("acme");
    triage_command(&workspace)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run `triage sync`"));
}

#[test]
fn test_missing_org_is_an_error() {
    let workspace = TriageWorkspace::new();
    triage_command(&workspace)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No organization configured"));
}

#[test]
fn test_org_flag_overrides_config() {
    let (workspace, _) = seeded();
    workspace.seed_snapshot(
        "other",
        &[record(900, 1, "site", "Broken link", "2024-01-01T00:00:00Z")],
    );
    let list = run_triage(&workspace, ["--org", "other", "list"], "list_other");
    assert!(list.status.success(), "list failed: {}", list.stderr);
    assert!(list.stdout.contains("Broken link"));
    assert!(!list.stdout.contains("Webhook"));
}

#[test]
fn test_show_json_preserves_unknown_fields() {
    let (workspace, _) = seeded();
    let show = run_triage(&workspace, ["show", "docs#12", "--json"], "show");
    assert!(show.status.success(), "show failed: {}", show.stderr);

    let parsed: serde_json::Value = serde_json::from_str(&show.stdout).expect("json record");
    assert_eq!(parsed["id"], 100);
    assert_eq!(parsed["comments"], 2);
    assert_eq!(parsed["labels"][0]["name"], "bug");
}

#[test]
fn test_show_ambiguous_number_fails() {
    let (workspace, _) = seeded();
    let show = run_triage(&workspace, ["show", "#7"], "show_ambiguous");
    assert!(!show.status.success());
    assert!(show.stderr.contains("Ambiguous number #7"), "stderr: {}", show.stderr);
}

#[test]
fn test_show_unknown_record_fails() {
    let (workspace, _) = seeded();
    let show = run_triage(&workspace, ["show", "4242"], "show_missing");
    assert!(!show.status.success());
    assert!(show.stderr.contains("Record not found"), "stderr: {}", show.stderr);
}

#[test]
fn test_open_json_prints_url() {
    let (workspace, _) = seeded();
    let open = run_triage(&workspace, ["open", "300", "--json"], "open");
    assert!(open.status.success(), "open failed: {}", open.stderr);
    assert!(open.stdout.contains("https://github.com/acme/api/issues/7"));
}

#[test]
fn test_refresh_failure_leaves_snapshot_untouched() {
    let (workspace, path) = seeded();
    let before = workspace.read(&path);

    let refresh = run_triage(&workspace, ["refresh", "docs#12"], "refresh");
    assert!(!refresh.status.success());
    assert_eq!(workspace.read(&path), before);
}

#[test]
fn test_sync_failure_shows_cached_list() {
    let (workspace, path) = seeded();
    let before = workspace.read(&path);

    let sync = run_triage(&workspace, ["sync"], "sync");
    assert!(!sync.status.success());
    assert!(sync.stdout.contains("Webhook retries fail"));
    assert!(sync.stderr.contains("Error:"), "stderr: {}", sync.stderr);
    assert_eq!(workspace.read(&path), before);
}

#[test]
fn test_sync_failure_json_returns_cached_records() {
    let (workspace, path) = seeded();
    let before = workspace.read(&path);

    let sync = run_triage(&workspace, ["sync", "--json"], "sync_json_failure");
    assert!(!sync.status.success());

    let parsed: serde_json::Value = serde_json::from_str(&sync.stdout).expect("json output");
    assert!(parsed["error"].as_str().is_some_and(|e| e.starts_with("HTTP error")));
    let ids: Vec<u64> = parsed["records"]
        .as_array()
        .expect("records array")
        .iter()
        .filter_map(|item| item["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![300, 100, 200]);
    assert_eq!(workspace.read(&path), before);
}
