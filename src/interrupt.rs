// src/interrupt.rs
//! Ctrl-C handling for tree mode: a blunt whole-process abort.

use crate::exit::SweepExit;
use crate::progress::Progress;
use anyhow::{Context, Result};
use colored::Colorize;
use std::sync::Arc;
use std::thread;

/// Watches for Ctrl-C on a background thread. On delivery the run is
/// abandoned: in-flight analyzer processes are not waited for.
///
/// # Errors
/// Returns error if the signal runtime or its thread cannot be created.
pub fn install(progress: Arc<Progress>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build signal runtime")?;

    thread::Builder::new()
        .name("tidysweep-interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    abort(&progress);
                }
            });
        })
        .context("Failed to spawn interrupt watcher")?;
    Ok(())
}

fn abort(progress: &Progress) -> ! {
    eprintln!("\n{}", "Interrupted, aborting analysis.".yellow().bold());
    progress.done();
    SweepExit::Interrupted.exit()
}
