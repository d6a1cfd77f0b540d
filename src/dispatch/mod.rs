// src/dispatch/mod.rs
//! Tree-mode batch dispatcher.
//!
//! The whole batch list is handed to a fixed-size rayon pool up front. Each
//! task runs one analyzer invocation, prints its output and bumps the shared
//! progress counter. Completion order is whatever the pool produces.

pub mod batch;
pub mod tidy;

pub use batch::{batched, Batch};
pub use tidy::{BatchOutcome, ClangTidy};

use crate::config::RunConfig;
use crate::discovery;
use crate::error::SweepError;
use crate::interrupt;
use crate::progress::Progress;
use crate::reporting;
use crate::types::CommandResult;
use anyhow::{Context, Result};
use rayon::prelude::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use rayon::ThreadPoolBuilder;
use std::sync::Arc;
use tracing::{debug, warn};

/// Tally of a tree run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub batches: usize,
    pub files: usize,
    pub clean: usize,
    pub findings: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub no_checks: usize,
}

impl DispatchSummary {
    fn record(&mut self, batch: &Batch, outcome: BatchOutcome) {
        self.batches += 1;
        self.files += batch.len();
        match outcome {
            BatchOutcome::Clean => self.clean += 1,
            BatchOutcome::Findings => self.findings += 1,
            BatchOutcome::Failed => self.failed += 1,
            BatchOutcome::TimedOut => self.timed_out += 1,
            BatchOutcome::NoChecks => self.no_checks += 1,
        }
    }
}

/// Runs every batch through `analyze` on a pool of `jobs` workers.
///
/// `jobs == 0` lets rayon size the pool. Per-batch failures are counted,
/// never propagated.
///
/// # Errors
/// Returns error only if the worker pool cannot be created.
pub fn run_batches<F>(
    batches: &[Batch],
    jobs: usize,
    progress: &Progress,
    analyze: F,
) -> Result<DispatchSummary>
where
    F: Fn(&Batch) -> CommandResult + Sync,
{
    let pool = ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|i| format!("tidysweep-worker-{i}"))
        .build()
        .context("Failed to start worker pool")?;

    let outcomes: Vec<BatchOutcome> = pool.install(|| {
        batches
            .par_iter()
            .with_max_len(1)
            .map(|batch| {
                let result = analyze(batch);
                let outcome = tidy::classify(&result);
                if outcome == BatchOutcome::NoChecks {
                    warn!("clang-tidy reported no enabled checks for: {}", result.command());
                }
                reporting::print_batch_output(&result);
                progress.update(batch.len());
                progress.report();
                outcome
            })
            .collect()
    });

    let mut summary = DispatchSummary::default();
    for (batch, outcome) in batches.iter().zip(outcomes) {
        summary.record(batch, outcome);
    }
    Ok(summary)
}

/// Analyzes every qualifying file of the compilation database.
///
/// # Errors
/// Returns error if clang-tidy is missing, the compilation database is
/// unreadable, or the worker pool / interrupt handler cannot start.
pub fn scan_tree(config: &RunConfig) -> Result<DispatchSummary> {
    let binary = config
        .clang_tidy
        .as_deref()
        .ok_or(SweepError::ClangTidyNotFound)?;

    let files = discovery::list_sources(&config.build_path, config.scan_root.as_deref())?;
    let batches = batched(&files, config.batch_size);
    debug!(
        "Dispatching {} files in {} batches of up to {}",
        files.len(),
        batches.len(),
        config.batch_size
    );

    let progress = Arc::new(Progress::new());
    progress.start(files.len());
    progress.report();
    interrupt::install(Arc::clone(&progress))?;

    let tidy = ClangTidy::new(binary, &config.build_path, config.timeout);
    let summary = run_batches(&batches, config.jobs, &progress, |batch| tidy.run(batch))?;

    progress.done();
    Ok(summary)
}
