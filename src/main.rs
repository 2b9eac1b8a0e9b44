//! `gh-triage` (triage) - Issue/PR triage cache for a GitHub organization
//!
//! Keeps a local snapshot of open issues and pull requests and reconciles it
//! with every sync, preserving the order you already know.

use gh_triage::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
