// src/git.rs
//! Read-only git queries used during environment probing.

use crate::shell::{self, JOB_TIMEOUT};
use std::path::{Path, PathBuf};
use std::process::Command;

fn git_stdout(dir: &Path, args: &[&str]) -> Option<String> {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(dir);
    let result = shell::execute(&mut cmd, JOB_TIMEOUT);
    if !result.passed() {
        return None;
    }
    let out = result.stdout().trim();
    (!out.is_empty()).then(|| out.to_string())
}

/// Top-level directory of the work tree containing `dir`.
#[must_use]
pub fn repository_root(dir: &Path) -> Option<PathBuf> {
    git_stdout(dir, &["rev-parse", "--show-toplevel"]).map(PathBuf::from)
}

/// Current branch name. Empty when detached or outside a repository.
#[must_use]
pub fn branch_name(dir: &Path) -> String {
    git_stdout(dir, &["branch", "--show-current"]).unwrap_or_default()
}
