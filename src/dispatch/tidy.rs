// src/dispatch/tidy.rs
//! clang-tidy invocation for one batch and the rules for what of its
//! output reaches the terminal.

use super::batch::Batch;
use crate::shell;
use crate::types::CommandResult;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// clang-tidy's wording when the effective check list is empty.
/// Matched literally; a reworded message in a newer release slips through.
pub const NO_CHECKS_ENABLED: &str = "no checks enabled";

/// How a batch ended, for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Exit 0, nothing on stdout.
    Clean,
    /// Diagnostics on stdout (exit code may be non-zero with `-warnings-as-errors`).
    Findings,
    /// Non-zero exit with no diagnostics: the tool itself failed.
    Failed,
    /// The analyzer had no checks to run.
    NoChecks,
    /// Killed after the per-invocation deadline.
    TimedOut,
}

/// A clang-tidy binary bound to one build directory.
#[derive(Debug, Clone)]
pub struct ClangTidy {
    binary: PathBuf,
    build_path: PathBuf,
    timeout: Duration,
}

impl ClangTidy {
    #[must_use]
    pub fn new(binary: &Path, build_path: &Path, timeout: Duration) -> Self {
        Self {
            binary: binary.to_path_buf(),
            build_path: build_path.to_path_buf(),
            timeout,
        }
    }

    /// `clang-tidy -p <build> --quiet <files...>`
    #[must_use]
    pub fn command(&self, batch: &Batch) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("-p")
            .arg(&self.build_path)
            .arg("--quiet")
            .args(batch.files());
        cmd
    }

    #[must_use]
    pub fn run(&self, batch: &Batch) -> CommandResult {
        shell::execute(&mut self.command(batch), self.timeout)
    }
}

fn reports_no_checks(result: &CommandResult) -> bool {
    result.stdout().contains(NO_CHECKS_ENABLED) || result.stderr().contains(NO_CHECKS_ENABLED)
}

#[must_use]
pub fn classify(result: &CommandResult) -> BatchOutcome {
    if result.is_timeout() {
        BatchOutcome::TimedOut
    } else if reports_no_checks(result) {
        BatchOutcome::NoChecks
    } else if !result.stdout().is_empty() {
        BatchOutcome::Findings
    } else if result.passed() {
        BatchOutcome::Clean
    } else {
        BatchOutcome::Failed
    }
}

/// stdout is shown whenever there is some, unless the batch had no checks.
#[must_use]
pub fn visible_stdout(result: &CommandResult) -> Option<&str> {
    let out = result.stdout();
    (!out.is_empty() && !reports_no_checks(result)).then_some(out)
}

/// stderr is shown only for a failure that left stdout empty. A run that
/// merely printed "N warnings generated." alongside diagnostics stays quiet.
#[must_use]
pub fn visible_stderr(result: &CommandResult) -> Option<&str> {
    let err = result.stderr();
    let show = !result.passed()
        && result.stdout().is_empty()
        && !err.is_empty()
        && !reports_no_checks(result);
    show.then_some(err)
}
