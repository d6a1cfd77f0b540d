// tests/unit_dispatch.rs
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tidysweep_core::dispatch::{batched, run_batches, Batch};
use tidysweep_core::progress::Progress;
use tidysweep_core::types::CommandResult;

fn paths(n: usize) -> Vec<PathBuf> {
    (0..n).map(|i| PathBuf::from(format!("/src/sql/f{i}.cc"))).collect()
}

fn clean(batch: &Batch) -> CommandResult {
    CommandResult::new(
        format!("clang-tidy {} files", batch.len()),
        0,
        String::new(),
        String::new(),
        1,
    )
}

fn result(code: i32, stdout: &str, stderr: &str) -> CommandResult {
    CommandResult::new("t".into(), code, stdout.into(), stderr.into(), 1)
}

#[test]
fn partition_shape_for_many_sizes() {
    for n in 0..25 {
        for size in 1..7 {
            let files = paths(n);
            let batches = batched(&files, size);

            assert_eq!(batches.len(), n.div_ceil(size), "n={n} size={size}");
            if let Some((last, full)) = batches.split_last() {
                assert!(full.iter().all(|b| b.len() == size));
                assert!(last.len() >= 1 && last.len() <= size);
            }
            let rejoined: Vec<PathBuf> = batches.iter().flat_map(|b| b.files().to_vec()).collect();
            assert_eq!(rejoined, files);
        }
    }
}

#[test]
fn every_batch_is_analyzed_once() {
    let batches = batched(&paths(11), 3);
    let seen = Mutex::new(Vec::new());
    let progress = Progress::new();
    progress.start(11);

    let summary = run_batches(&batches, 3, &progress, |b| {
        seen.lock().unwrap().push(b.files().to_vec());
        clean(b)
    })
    .unwrap();

    let mut seen = seen.into_inner().unwrap();
    seen.sort();
    let mut expected: Vec<Vec<PathBuf>> = batches.iter().map(|b| b.files().to_vec()).collect();
    expected.sort();
    assert_eq!(seen, expected);

    assert_eq!(summary.batches, 4);
    assert_eq!(summary.files, 11);
    assert_eq!(summary.clean, 4);
    assert_eq!(progress.snapshot().processed, 11);
}

#[test]
fn timeout_does_not_stop_other_batches() {
    let batches = batched(&paths(6), 2);
    let calls = AtomicUsize::new(0);
    let progress = Progress::new();
    progress.start(6);

    let summary = run_batches(&batches, 2, &progress, |b| {
        calls.fetch_add(1, Ordering::SeqCst);
        if b.files()[0].ends_with("f0.cc") {
            CommandResult::timed_out("clang-tidy f0.cc f1.cc".into(), 1)
        } else {
            clean(b)
        }
    })
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(summary.timed_out, 1);
    assert_eq!(summary.clean, 2);
    assert_eq!(progress.snapshot().processed, 6);
}

#[test]
fn outcomes_are_tallied() {
    let batches = batched(&paths(4), 1);
    let progress = Progress::new();
    progress.start(4);

    let summary = run_batches(&batches, 2, &progress, |b| {
        let name = b.files()[0].file_name().unwrap().to_string_lossy().into_owned();
        match name.as_str() {
            "f0.cc" => result(1, "f0.cc:1:1: warning: w", ""),
            "f1.cc" => result(1, "", "error: crashed"),
            "f2.cc" => result(1, "", "Error: no checks enabled."),
            _ => clean(b),
        }
    })
    .unwrap();

    assert_eq!(summary.findings, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.no_checks, 1);
    assert_eq!(summary.clean, 1);
}

#[test]
fn no_batches_no_calls() {
    let progress = Progress::new();
    progress.start(0);
    let summary = run_batches(&[], 2, &progress, |_| panic!("must not run")).unwrap();
    assert_eq!(summary.batches, 0);
}

#[test]
fn zero_jobs_uses_pool_default() {
    let batches = batched(&paths(3), 1);
    let progress = Progress::new();
    progress.start(3);
    let summary = run_batches(&batches, 0, &progress, clean).unwrap();
    assert_eq!(summary.batches, 3);
}
