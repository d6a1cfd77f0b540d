// src/commit.rs
//! Commit mode: one `git diff | clang-tidy-diff.py` pipeline.
//!
//! No batching or worker pool here; clang-tidy-diff.py parallelizes on its own.

use crate::config::RunConfig;
use crate::error::SweepError;
use crate::shell;
use crate::types::CommandResult;
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// C/C++ sources and headers included in the diff.
pub const SOURCE_PATTERNS: &[&str] = &[
    "*.c", "*.cc", "*.cpp", "*.cxx", "*.h", "*.hh", "*.hpp", "*.ic", "*.i",
];

/// Excludes bundled third-party code at any depth.
pub const THIRD_PARTY_PATHSPEC: &str = ":(exclude,glob)**/extra/**";

/// Inputs for the commit pipeline.
#[derive(Debug, Clone, Copy)]
pub struct DiffRequest<'a> {
    pub commit: &'a str,
    pub diff_script: &'a Path,
    pub jobs: usize,
    pub build_path: &'a Path,
    pub error_limit: u32,
}

/// Builds the shell pipeline. Every interpolated value is quoted.
#[must_use]
pub fn diff_pipeline(req: &DiffRequest<'_>) -> String {
    let quote = |s: &str| shell_words::quote(s).into_owned();
    let parent = format!("{}^", req.commit);

    let mut diff = vec![
        "git".to_string(),
        "diff".to_string(),
        "-U0".to_string(),
        "--no-color".to_string(),
        quote(&parent),
        quote(req.commit),
        "--".to_string(),
    ];
    diff.extend(SOURCE_PATTERNS.iter().map(|p| quote(p)));
    diff.push(quote(THIRD_PARTY_PATHSPEC));

    let tidy_diff = [
        "python3".to_string(),
        quote(&req.diff_script.to_string_lossy()),
        "-p1".to_string(),
        "-j".to_string(),
        req.jobs.to_string(),
        "-path".to_string(),
        quote(&req.build_path.to_string_lossy()),
        format!("-extra-arg=-ferror-limit={}", req.error_limit),
    ];

    format!("{} | {}", diff.join(" "), tidy_diff.join(" "))
}

/// Runs clang-tidy on the lines changed by `commit`.
///
/// # Errors
/// Returns error if no clang-tidy-diff.py script was resolved.
pub fn scan_commit(config: &RunConfig, commit: &str) -> Result<CommandResult> {
    let diff_script = config
        .clang_tidy_diff
        .as_deref()
        .ok_or(SweepError::ClangTidyDiffNotFound)?;

    let line = diff_pipeline(&DiffRequest {
        commit,
        diff_script,
        jobs: config.jobs,
        build_path: &config.build_path,
        error_limit: config.error_limit,
    });
    debug!("Running: {line}");
    Ok(shell::execute_shell(&line, config.timeout))
}
