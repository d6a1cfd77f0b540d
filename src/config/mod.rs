// src/config/mod.rs
//! Run configuration: resolved once at startup, read-only afterwards.

pub mod io;
pub mod types;

pub use self::types::SweepToml;

use std::path::PathBuf;
use std::time::Duration;

/// Optional settings file, looked up in the working directory then the repository root.
pub const CONFIG_FILE: &str = "tidysweep.toml";

/// What to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    /// Every file in the compilation database under `source_root`.
    Tree { source_root: PathBuf },
    /// Lines changed by one commit.
    Commit(String),
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: ScanTarget,
    /// Directory holding `compile_commands.json`.
    pub build_path: PathBuf,
    /// Set when the tree target needs it.
    pub clang_tidy: Option<PathBuf>,
    /// Set when the commit target needs it.
    pub clang_tidy_diff: Option<PathBuf>,
    pub scan_root: Option<PathBuf>,
    /// Zero lets the pool pick its own size.
    pub jobs: usize,
    pub batch_size: usize,
    pub timeout: Duration,
    pub error_limit: u32,
}
