// src/discovery.rs
//! Source discovery from a compilation database.

use crate::error::{Result, SweepError};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub const COMPILE_DB: &str = "compile_commands.json";

/// Path segment marking bundled third-party code. Never analyzed.
pub const THIRD_PARTY_SEGMENT: &str = "/extra/";

/// One entry of `compile_commands.json`. Only the fields we filter on.
#[derive(Debug, Clone, Deserialize)]
pub struct CompileCommand {
    pub directory: PathBuf,
    pub file: PathBuf,
}

impl CompileCommand {
    /// Absolute source path; relative `file` entries are relative to `directory`.
    /// `.` and `..` are folded lexically so the scan-root prefix can match.
    #[must_use]
    pub fn source_path(&self) -> PathBuf {
        if self.file.is_absolute() {
            lexical_normalize(&self.file)
        } else {
            lexical_normalize(&self.directory.join(&self.file))
        }
    }
}

/// Folds `.` and `..` without touching the filesystem. Symlinks are not resolved.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Runs the discovery pipeline for `build_path/compile_commands.json`.
///
/// # Errors
/// Returns error if the database cannot be read or is not a JSON array of entries.
pub fn list_sources(build_path: &Path, scan_root: Option<&Path>) -> Result<Vec<PathBuf>> {
    let entries = read_compile_db(&build_path.join(COMPILE_DB))?;
    let files = filter_sources(&entries, scan_root);
    debug!("Found {} source code files to process", files.len());
    Ok(files)
}

/// Parses a compilation database.
///
/// # Errors
/// Returns error on I/O failure or malformed JSON.
pub fn read_compile_db(path: &Path) -> Result<Vec<CompileCommand>> {
    let content = fs::read_to_string(path).map_err(|source| SweepError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    serde_json::from_str(&content).map_err(|source| SweepError::CompileDb {
        source,
        path: path.to_path_buf(),
    })
}

/// Applies scan-root, third-party and existence filters, then removes
/// duplicates keeping first-seen order.
#[must_use]
pub fn filter_sources(entries: &[CompileCommand], scan_root: Option<&Path>) -> Vec<PathBuf> {
    let prefix = scan_root.map(normalize_path);
    let mut seen = HashSet::new();

    entries
        .iter()
        .map(CompileCommand::source_path)
        .filter(|p| {
            let s = normalize_path(p);
            if let Some(prefix) = &prefix {
                if !s.starts_with(prefix.as_str()) {
                    return false;
                }
            }
            !s.contains(THIRD_PARTY_SEGMENT)
        })
        .filter(|p| p.is_file())
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
