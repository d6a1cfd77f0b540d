// src/cli/args.rs
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "tidysweep",
    version,
    about = "Runs clang-tidy on a source tree or a single commit"
)]
pub struct Cli {
    /// More verbose output
    #[arg(short, long)]
    pub verbose: bool,
    /// Build path, where compile_commands.json is stored
    #[arg(short = 'p', long = "path", value_name = "PATH")]
    pub build_path: Option<PathBuf>,
    /// clang-tidy binary path
    #[arg(long, value_name = "PATH")]
    pub clang_tidy: Option<PathBuf>,
    /// Path to clang-tidy-diff.py script
    #[arg(long, value_name = "PATH")]
    pub clang_tidy_diff: Option<PathBuf>,
    /// Number of parallel analysis jobs (0 or less: derive from CPU count)
    #[arg(short, long, value_name = "THREADS", default_value_t = 0, allow_negative_numbers = true)]
    pub jobs: i64,
    /// Source tree sub-directory, for partial tree scanning
    #[arg(long, value_name = "PATH")]
    pub scan_root: Option<PathBuf>,
    /// Do not warn on detecting unofficial clang-tidy version
    #[arg(long)]
    pub nowarn: bool,

    /// Scan an entire source code tree
    #[arg(short, long, help_heading = "Scan target")]
    pub tree: bool,
    /// Scan a single git repository commit (default: HEAD)
    #[arg(
        short,
        long,
        value_name = "COMMIT",
        num_args = 0..=1,
        default_missing_value = "HEAD",
        help_heading = "Scan target"
    )]
    pub commit: Option<String>,
}
