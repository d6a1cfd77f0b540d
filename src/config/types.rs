// src/config/types.rs
use serde::Deserialize;
use std::path::PathBuf;

/// Contents of `tidysweep.toml`. Every key is optional; command-line flags win.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepToml {
    #[serde(default)]
    pub clang_tidy: Option<PathBuf>,
    #[serde(default)]
    pub clang_tidy_diff: Option<PathBuf>,
    /// Worker count; zero or negative means derive from the CPU count.
    #[serde(default)]
    pub jobs: Option<i64>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// clang-tidy major version the project's checks are tuned for.
    #[serde(default = "default_official_version")]
    pub official_version: u32,
    /// Branch that gets the newest clang-tidy-diff.py.
    #[serde(default = "default_trunk_branch")]
    pub trunk_branch: String,
    /// Passed to the compiler as `-ferror-limit=` in commit mode.
    #[serde(default)]
    pub error_limit: u32,
}

impl Default for SweepToml {
    fn default() -> Self {
        Self {
            clang_tidy: None,
            clang_tidy_diff: None,
            jobs: None,
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            official_version: default_official_version(),
            trunk_branch: default_trunk_branch(),
            error_limit: 0,
        }
    }
}

// Small on purpose: clang-tidy memory grows with files per invocation.
const fn default_batch_size() -> usize {
    4
}

const fn default_timeout_secs() -> u64 {
    20 * 60
}

const fn default_official_version() -> u32 {
    15
}

fn default_trunk_branch() -> String {
    "mysql-trunk".to_string()
}
