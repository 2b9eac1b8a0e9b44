use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// An isolated directory to run `triage` in.
///
/// HOME and XDG_CONFIG_HOME point inside the temp dir so no user config
/// leaks in, and the API URL points at a closed local port so network
/// commands fail fast.
pub struct TriageWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TriageWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Workspace with `.triage/config.yaml` naming `org`.
    pub fn with_org(org: &str) -> Self {
        let workspace = Self::new();
        workspace.write_config(&format!("org: {org}\n"));
        workspace
    }

    pub fn write_config(&self, yaml: &str) {
        let dir = self.root.join(".triage");
        fs::create_dir_all(&dir).expect("create .triage");
        fs::write(dir.join("config.yaml"), yaml).expect("write config");
    }

    pub fn snapshot_path(&self, org: &str) -> PathBuf {
        self.root.join(format!("{}-issues-prs.json", org.to_lowercase()))
    }

    pub fn seed_snapshot(&self, org: &str, records: &[Value]) -> PathBuf {
        let path = self.snapshot_path(org);
        let body = serde_json::to_string_pretty(records).expect("serialize fixture");
        fs::write(&path, body).expect("write snapshot");
        path
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).expect("read file")
    }
}

pub struct RunResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

pub fn triage_command(workspace: &TriageWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("triage").expect("triage binary");
    cmd.current_dir(&workspace.root)
        .env("HOME", &workspace.root)
        .env("XDG_CONFIG_HOME", workspace.root.join(".config"))
        .env("TRIAGE_API_URL", "http://127.0.0.1:9")
        .env_remove("GITHUB_TOKEN")
        .env_remove("TRIAGE_ORG")
        .env_remove("TRIAGE_CACHE_DIR")
        .env_remove("TRIAGE_BOOTSTRAP_ORDER")
        .env_remove("BROWSER")
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_triage<I, S>(workspace: &TriageWorkspace, args: I, label: &str) -> RunResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = triage_command(workspace)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("run triage ({label}): {e}"));
    RunResult {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Run `triage` against a specific API root (usually a mock server).
pub fn run_triage_with_api<I, S>(
    workspace: &TriageWorkspace,
    api_url: &str,
    args: I,
    label: &str,
) -> RunResult
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let output = triage_command(workspace)
        .env("TRIAGE_API_URL", api_url)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("run triage ({label}): {e}"));
    RunResult {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// Record ids stored in a snapshot, in file order.
pub fn snapshot_ids(workspace: &TriageWorkspace, path: &Path) -> Vec<u64> {
    let parsed: Value = serde_json::from_str(&workspace.read(path)).expect("snapshot json");
    parsed
        .as_array()
        .expect("snapshot array")
        .iter()
        .filter_map(|item| item["id"].as_u64())
        .collect()
}
