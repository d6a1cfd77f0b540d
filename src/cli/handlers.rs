// src/cli/handlers.rs
use crate::cli::Cli;
use crate::commit;
use crate::config::{self, RunConfig, ScanTarget, SweepToml};
use crate::dispatch;
use crate::error::SweepError;
use crate::exit::SweepExit;
use crate::git;
use crate::probe;
use crate::reporting;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Scan target as requested on the command line, before probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRequest {
    Tree,
    Commit(String),
}

/// Checks flag combinations. Runs before anything touches the environment.
///
/// # Errors
/// Returns error if no target, both targets, or `--scan-root` without `--tree`.
pub fn validate_flags(cli: &Cli) -> Result<TargetRequest, SweepError> {
    let request = match (cli.tree, &cli.commit) {
        (false, None) => return Err(SweepError::NoScanTarget),
        (true, Some(_)) => return Err(SweepError::ConflictingTargets),
        (true, None) => TargetRequest::Tree,
        (false, Some(commit)) => TargetRequest::Commit(commit.clone()),
    };
    if cli.scan_root.is_some() && request != TargetRequest::Tree {
        return Err(SweepError::ScanRootRequiresTree);
    }
    Ok(request)
}

/// Resolves the full run configuration from flags, the config file and probing.
///
/// # Errors
/// Returns a [`SweepError`] for any missing precondition.
pub fn resolve_config(cli: &Cli, cwd: &Path) -> Result<RunConfig> {
    // Flags first: a bad combination must never reach git or clang-tidy.
    let request = validate_flags(cli)?;

    let repo_root = git::repository_root(cwd);
    let branch = git::branch_name(cwd);
    if matches!(request, TargetRequest::Commit(_)) && branch.is_empty() && repo_root.is_none() {
        return Err(SweepError::NotInGitRepo.into());
    }

    let mut search_dirs = vec![cwd];
    if let Some(root) = repo_root.as_deref() {
        search_dirs.push(root);
    }
    let settings = config::io::load_from(&search_dirs)?;

    let explicit_tidy = cli.clang_tidy.as_deref().or(settings.clang_tidy.as_deref());
    let clang_tidy = probe::find_clang_tidy(explicit_tidy);
    if explicit_tidy.is_none() && !cli.nowarn {
        if let Some(binary) = clang_tidy.as_deref() {
            probe::warn_if_unofficial(binary, settings.official_version);
        }
    }

    let (target, search_root) = match request {
        TargetRequest::Tree => {
            let source_root = probe::source_root(cwd);
            (ScanTarget::Tree { source_root: source_root.clone() }, source_root)
        }
        TargetRequest::Commit(commit) => {
            let root = repo_root.clone().unwrap_or_else(|| cwd.to_path_buf());
            (ScanTarget::Commit(commit), root)
        }
    };

    let clang_tidy_diff = match target {
        ScanTarget::Commit(_) => {
            let explicit = cli
                .clang_tidy_diff
                .as_deref()
                .or(settings.clang_tidy_diff.as_deref());
            let candidates = probe::diff_script_candidates(
                &branch,
                &settings.trunk_branch,
                clang_tidy.as_deref(),
            );
            probe::find_diff_script(explicit, candidates)
        }
        ScanTarget::Tree { .. } => None,
    };

    let jobs = resolve_jobs(cli.jobs, &settings);
    info!("Run analysis using {jobs} parallel jobs");

    let build_path = match &cli.build_path {
        Some(path) => path.clone(),
        None => probe::find_build_path(cwd, &search_root).ok_or(SweepError::BuildPathNotFound)?,
    };

    match target {
        ScanTarget::Tree { .. } if clang_tidy.is_none() => {
            return Err(SweepError::ClangTidyNotFound.into())
        }
        ScanTarget::Commit(_) if clang_tidy_diff.is_none() => {
            return Err(SweepError::ClangTidyDiffNotFound.into())
        }
        _ => {}
    }

    Ok(RunConfig {
        target,
        build_path,
        clang_tidy,
        clang_tidy_diff,
        scan_root: cli.scan_root.as_deref().map(|p| absolutize(cwd, p)),
        jobs,
        batch_size: settings.batch_size.max(1),
        timeout: Duration::from_secs(settings.timeout_secs),
        error_limit: settings.error_limit,
    })
}

fn resolve_jobs(flag: i64, settings: &SweepToml) -> usize {
    let requested = if flag > 0 { flag } else { settings.jobs.unwrap_or(0) };
    probe::resolve_jobs(requested)
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Entry point for a parsed command line.
///
/// # Errors
/// Returns error for configuration failures; analyzer failures are reported, not returned.
pub fn handle(cli: &Cli) -> Result<SweepExit> {
    let cwd = std::env::current_dir().map_err(|_| SweepError::SourceRootNotFound)?;
    let config = resolve_config(cli, &cwd)?;

    match &config.target {
        ScanTarget::Tree { .. } => handle_tree(&config),
        ScanTarget::Commit(commit) => handle_commit(&config, commit),
    }
}

/// Handles `--tree`.
///
/// # Errors
/// Returns error if discovery or the worker pool fails.
pub fn handle_tree(config: &RunConfig) -> Result<SweepExit> {
    let summary = dispatch::scan_tree(config)?;
    reporting::print_summary(&summary);
    Ok(SweepExit::Success)
}

/// Handles `--commit`.
///
/// # Errors
/// Returns error if no clang-tidy-diff.py script was resolved.
pub fn handle_commit(config: &RunConfig, commit: &str) -> Result<SweepExit> {
    let result = commit::scan_commit(config, commit)?;
    reporting::print_commit_output(&result);
    Ok(SweepExit::Success)
}
