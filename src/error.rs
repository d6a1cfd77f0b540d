// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Fatal precondition failures. Any of these stops the run before the
/// first analyzer invocation.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("You must provide scan target (--tree or --commit)!")]
    NoScanTarget,

    #[error("--tree and --commit cannot be used together!")]
    ConflictingTargets,

    #[error("--scan-root can only be used with --tree target!")]
    ScanRootRequiresTree,

    #[error("Scanning a commit requires the presence of git repo!")]
    NotInGitRepo,

    #[error("Could not detect source code tree root!")]
    SourceRootNotFound,

    #[error("Failed to detect build path!")]
    BuildPathNotFound,

    #[error("Could not find clang-tidy binary!")]
    ClangTidyNotFound,

    #[error("Could not find clang-tidy-diff.py script!")]
    ClangTidyDiffNotFound,

    #[error("Invalid compilation database {path}: {source}")]
    CompileDb {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Invalid config file {path}: {source}")]
    Config {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, SweepError>;

// Allow `?` on std::io::Error by converting to SweepError::Io with unknown path.
impl From<std::io::Error> for SweepError {
    fn from(source: std::io::Error) -> Self {
        SweepError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}
