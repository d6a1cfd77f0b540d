// src/reporting.rs
//! Terminal output for analyzer results and the end-of-run summary.

use crate::dispatch::tidy::{visible_stderr, visible_stdout};
use crate::dispatch::DispatchSummary;
use crate::types::CommandResult;
use colored::Colorize;
use std::io::Write;

/// Prints what a tree-mode batch is allowed to show.
///
/// Each batch is written under one lock so lines from concurrent workers do
/// not interleave mid-batch.
pub fn print_batch_output(result: &CommandResult) {
    if let Some(out) = visible_stdout(result) {
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "\n{}", out.trim_end());
        let _ = stdout.flush();
    }
    if let Some(err) = visible_stderr(result) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "\n{}", err.trim_end());
    }
}

/// Commit mode: stdout always, stderr only on failure.
pub fn print_commit_output(result: &CommandResult) {
    if !result.stdout().is_empty() {
        print!("{}", result.stdout());
        let _ = std::io::stdout().flush();
    }
    if !result.passed() && !result.stderr().is_empty() {
        eprint!("{}", result.stderr());
    }
}

pub fn print_summary(summary: &DispatchSummary) {
    let header = format!(
        "Analyzed {} files in {} batches",
        summary.files, summary.batches
    );
    if summary.failed + summary.timed_out == 0 {
        println!("{}", header.green().bold());
    } else {
        println!("{}", header.yellow().bold());
    }

    println!(
        "  {} with findings, {} clean",
        summary.findings.to_string().cyan(),
        summary.clean
    );
    if summary.failed > 0 {
        println!(
            "  {} {}",
            summary.failed.to_string().red(),
            pluralize(summary.failed, "batch failed", "batches failed")
        );
    }
    if summary.timed_out > 0 {
        println!(
            "  {} {}",
            summary.timed_out.to_string().red(),
            pluralize(summary.timed_out, "batch timed out", "batches timed out")
        );
    }
    if summary.no_checks > 0 {
        println!(
            "  {} {}",
            summary.no_checks.to_string().yellow(),
            pluralize(
                summary.no_checks,
                "batch ran with no checks enabled",
                "batches ran with no checks enabled"
            )
        );
    }
}

fn pluralize<'a>(n: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if n == 1 {
        singular
    } else {
        plural
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralize_picks_form() {
        assert_eq!(pluralize(1, "batch", "batches"), "batch");
        assert_eq!(pluralize(0, "batch", "batches"), "batches");
        assert_eq!(pluralize(3, "batch", "batches"), "batches");
    }
}
