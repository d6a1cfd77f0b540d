// src/dispatch/batch.rs
//! Fixed-size partitioning of the file list.

use std::path::PathBuf;

/// One analyzer invocation worth of files. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    files: Vec<PathBuf>,
}

impl Batch {
    #[must_use]
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Splits `files` into consecutive batches of at most `size` files.
/// Only the last batch may be shorter. A `size` of zero is treated as one.
#[must_use]
pub fn batched(files: &[PathBuf], size: usize) -> Vec<Batch> {
    files
        .chunks(size.max(1))
        .map(|chunk| Batch::new(chunk.to_vec()))
        .collect()
}
