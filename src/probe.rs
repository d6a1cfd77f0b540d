// src/probe.rs
//! Best-effort discovery of tools and paths.
//!
//! Each lookup is an ordered list of probes; the first one that yields a
//! path wins. Nothing here is authoritative beyond "first plausible match".

use crate::discovery::COMPILE_DB;
use crate::git;
use crate::shell::{self, JOB_TIMEOUT};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Default worker count is CPU count divided by this; clang-tidy is heavy.
pub const JOBS_DIVISOR: usize = 3;

pub const CLANG_TIDY: &str = "clang-tidy";

/// Build directory name tried under the repository root.
pub const CONVENTIONAL_BUILD_DIR: &str = "bld";

const TRUNK_DIFF_SCRIPT: &str = "/opt/llvm-17.0.1/share/clang/clang-tidy-diff.py";
const LEGACY_DIFF_SCRIPT: &str = "/opt/llvm-15.0.7/share/clang/clang-tidy-diff.py";
const DISTRO_DIFF_SCRIPT: &str = "/usr/share/clang/clang-tidy-diff.py";
const DISTRO_CLANG_TIDY: &str = "/usr/bin/clang-tidy";

const VERSION_MARKER: &str = "version ";

/// A single lookup strategy.
pub type Probe<'a> = Box<dyn FnOnce() -> Option<PathBuf> + 'a>;

/// Runs probes in order and returns the first hit.
pub fn first_match<'a>(probes: impl IntoIterator<Item = Probe<'a>>) -> Option<PathBuf> {
    probes.into_iter().find_map(|probe| probe())
}

fn existing_file(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}

/// Repository root, or `cwd` when git cannot tell.
#[must_use]
pub fn source_root(cwd: &Path) -> PathBuf {
    git::repository_root(cwd).unwrap_or_else(|| {
        debug!(
            "Assume current work dir is the source tree root: '{}'",
            cwd.display()
        );
        cwd.to_path_buf()
    })
}

#[must_use]
pub fn cpu_count() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Worker count for a `--jobs` request. Non-positive means auto; the
/// result may be zero on small machines, which the pool treats as "default".
#[must_use]
pub fn resolve_jobs(requested: i64) -> usize {
    if requested > 0 {
        usize::try_from(requested).unwrap_or(usize::MAX)
    } else {
        cpu_count() / JOBS_DIVISOR
    }
}

/// Locates clang-tidy. An explicit path must exist; otherwise only `$PATH` is searched.
#[must_use]
pub fn find_clang_tidy(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return existing_file(path.to_path_buf());
    }
    let found = which::which(CLANG_TIDY).ok().and_then(existing_file);
    debug!("Detected clang-tidy binary: '{}'", display_opt(found.as_deref()));
    found
}

/// Extracts the major version from `clang-tidy --version` output.
/// Returns 0 when the text has no recognizable version.
#[must_use]
pub fn parse_major_version(output: &str) -> u32 {
    let Some(pos) = output.find(VERSION_MARKER) else {
        return 0;
    };
    let rest = &output[pos + VERSION_MARKER.len()..];
    let Some(dot) = rest.find('.') else {
        return 0;
    };
    rest[..dot].trim().parse().unwrap_or(0)
}

/// Runs `<binary> --version` and parses the major version (0 on failure).
#[must_use]
pub fn tidy_major_version(binary: &Path) -> u32 {
    let mut cmd = Command::new(binary);
    cmd.arg("--version");
    parse_major_version(shell::execute(&mut cmd, JOB_TIMEOUT).stdout())
}

#[must_use]
pub fn is_official_version(version: u32, official: u32) -> bool {
    version == official
}

/// Warns when an auto-detected clang-tidy is not the version the checks target.
pub fn warn_if_unofficial(binary: &Path, official: u32) {
    let version = tidy_major_version(binary);
    if !is_official_version(version, official) {
        warn!("WARNING: Not using official clang-tidy binary version for this scan target.");
        debug!("clang-tidy major version {version}, expected {official}");
    }
}

/// Well-known clang-tidy-diff.py locations, most preferred first.
///
/// The trunk branch (or an unknown branch) gets the newest toolchain; every
/// branch may fall back to the legacy one. The distribution script only fits
/// the distribution clang-tidy.
#[must_use]
pub fn diff_script_candidates(
    branch: &str,
    trunk_branch: &str,
    clang_tidy: Option<&Path>,
) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if branch.is_empty() || branch == trunk_branch {
        candidates.push(PathBuf::from(TRUNK_DIFF_SCRIPT));
    }
    candidates.push(PathBuf::from(LEGACY_DIFF_SCRIPT));
    if clang_tidy == Some(Path::new(DISTRO_CLANG_TIDY)) {
        candidates.push(PathBuf::from(DISTRO_DIFF_SCRIPT));
    }
    candidates
}

/// Locates clang-tidy-diff.py. An explicit path must exist.
#[must_use]
pub fn find_diff_script(explicit: Option<&Path>, candidates: Vec<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return existing_file(path.to_path_buf());
    }
    let found = first_match(
        candidates
            .into_iter()
            .map(|c| -> Probe<'static> { Box::new(move || existing_file(c)) }),
    );
    debug!(
        "Detected clang-tidy-diff.py script: '{}'",
        display_opt(found.as_deref())
    );
    found
}

/// Directory holding `compile_commands.json`: `cwd`, then `<root>/bld`,
/// then the first match anywhere under `root`.
#[must_use]
pub fn find_build_path(cwd: &Path, repo_root: &Path) -> Option<PathBuf> {
    let found = first_match([
        Box::new(|| {
            let hit = cwd.join(COMPILE_DB).is_file().then(|| cwd.to_path_buf());
            if hit.is_some() {
                debug!("Detected current working directory as build path");
            }
            hit
        }) as Probe<'_>,
        Box::new(|| {
            let bld = repo_root.join(CONVENTIONAL_BUILD_DIR);
            bld.join(COMPILE_DB).is_file().then_some(bld)
        }),
        Box::new(|| search_compile_db(repo_root)),
    ]);

    match &found {
        Some(path) => debug!("Detected build path as: '{}'", path.display()),
        None => info!("Failed to detect build path ({COMPILE_DB} missing)"),
    }
    found
}

fn search_compile_db(root: &Path) -> Option<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(Result::ok)
        .find(|e| e.file_type().is_file() && e.file_name() == COMPILE_DB)
        .and_then(|e| e.path().parent().map(Path::to_path_buf))
}

fn display_opt(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_else(|| "None".to_string())
}
