// src/progress.rs
//! Shared progress counter with a linear ETA estimate.
//!
//! One [`Progress`] is created per run and handed to every worker behind an
//! `Arc`. Updates are plain atomic additions; rendering reads whatever the
//! counters hold at that moment, so a line may be one batch stale.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Wide enough to blank out the longest progress line.
const CLEAR_PADDING: usize = 46;

pub struct Progress {
    processed: AtomicUsize,
    total: AtomicUsize,
    started: Mutex<Instant>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSnapshot {
    pub processed: usize,
    pub total: usize,
    pub elapsed: Duration,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            processed: AtomicUsize::new(0),
            total: AtomicUsize::new(0),
            started: Mutex::new(Instant::now()),
        }
    }

    /// Resets the counters and restarts the clock. `total` may be zero.
    pub fn start(&self, total: usize) {
        *self.started.lock().unwrap_or_else(PoisonError::into_inner) = Instant::now();
        self.processed.store(0, Ordering::SeqCst);
        self.total.store(total, Ordering::SeqCst);
    }

    /// Adds `increment` processed files, saturating at the total.
    pub fn update(&self, increment: usize) {
        let total = self.total.load(Ordering::SeqCst);
        let _ = self
            .processed
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |done| {
                Some(done.saturating_add(increment).min(total))
            });
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        let started = *self.started.lock().unwrap_or_else(PoisonError::into_inner);
        ProgressSnapshot {
            processed: self.processed.load(Ordering::SeqCst),
            total: self.total.load(Ordering::SeqCst),
            elapsed: started.elapsed(),
        }
    }

    /// Rewrites the in-place progress line on stderr.
    pub fn report(&self) {
        if let Some(line) = self.snapshot().render() {
            let mut err = std::io::stderr().lock();
            let _ = write!(err, "\r{line}");
            let _ = err.flush();
        }
    }

    /// Replaces the progress line with the final elapsed time.
    pub fn done(&self) {
        let line = format!("Done in {}", format_duration(self.snapshot().elapsed));
        let mut err = std::io::stderr().lock();
        let _ = writeln!(err, "\r{line:<width$}", width = line.len() + CLEAR_PADDING);
        let _ = err.flush();
    }
}

impl ProgressSnapshot {
    /// Mean time per processed file extrapolated over the files still pending.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn remaining(&self) -> Option<Duration> {
        if self.processed == 0 || self.total == 0 {
            return None;
        }
        let per_file = self.elapsed.as_secs_f64() / self.processed as f64;
        let pending = self.total.saturating_sub(self.processed) as f64;
        Some(Duration::from_secs_f64(per_file * pending))
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.processed as f64 / self.total as f64
    }

    /// Progress line text, or `None` when there is no work at all.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        if self.total == 0 {
            return None;
        }
        let Some(remaining) = self.remaining() else {
            return Some(format!("0% (0/{} files)", self.total));
        };
        Some(format!(
            "{:.1}% ({}/{} files - {} elapsed, {} remaining)",
            self.percent(),
            self.processed,
            self.total,
            format_duration(self.elapsed),
            format_duration(remaining),
        ))
    }
}

/// Formats whole seconds as `H:MM:SS`.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(processed: usize, total: usize, secs: u64) -> ProgressSnapshot {
        ProgressSnapshot {
            processed,
            total,
            elapsed: Duration::from_secs(secs),
        }
    }

    #[test]
    fn format_duration_hours_minutes_seconds() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0:00:00");
        assert_eq!(format_duration(Duration::from_secs(75)), "0:01:15");
        assert_eq!(format_duration(Duration::from_secs(3 * 3600 + 5)), "3:00:05");
    }

    #[test]
    fn linear_estimate() {
        let s = snap(5, 20, 10);
        assert_eq!(s.remaining(), Some(Duration::from_secs(30)));
        assert_eq!(
            s.render().as_deref(),
            Some("25.0% (5/20 files - 0:00:10 elapsed, 0:00:30 remaining)")
        );
    }

    #[test]
    fn nothing_processed_has_no_estimate() {
        let s = snap(0, 8, 3);
        assert_eq!(s.remaining(), None);
        assert_eq!(s.render().as_deref(), Some("0% (0/8 files)"));
    }

    #[test]
    fn no_work_renders_nothing() {
        assert_eq!(snap(0, 0, 1).render(), None);
    }

    #[test]
    fn update_saturates_at_total() {
        let p = Progress::new();
        p.start(4);
        p.update(3);
        p.update(3);
        assert_eq!(p.snapshot().processed, 4);
    }

    #[test]
    fn start_resets_counters() {
        let p = Progress::new();
        p.start(4);
        p.update(2);
        p.start(9);
        let s = p.snapshot();
        assert_eq!((s.processed, s.total), (0, 9));
    }
}
