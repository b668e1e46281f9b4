//! Bulk operations over a set of source files.

use super::SourceFile;
use crate::error::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// The deduplicated set of source files a bulk operation targets.
///
/// Built from the scanner's canonicalized path set, so membership is keyed by
/// canonical path and iteration order is stable.
#[derive(Debug, Default)]
pub struct ProtectedSet {
    files: Vec<SourceFile>,
}

/// One file that failed during a bulk operation.
#[derive(Debug, Clone)]
pub struct BulkFailure {
    /// The file that could not be changed.
    pub path: PathBuf,
    /// The OS-level reason.
    pub reason: String,
}

/// Aggregate result of a bulk lock or unlock.
///
/// The whole batch succeeded only when `failed` is empty; callers needing
/// per-file detail read the failure list instead of the aggregate flag.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    /// Number of files whose permission change succeeded.
    pub succeeded: usize,
    /// Files whose permission change failed, with reasons.
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    /// True iff every file in the batch succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of files the batch attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed.len()
    }
}

/// Live lock-state tally across a set, for status reporting.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LockSummary {
    /// Files currently write-protected.
    pub locked: usize,
    /// Files currently writable.
    pub unlocked: usize,
    /// Files whose state could not be queried.
    pub unknown: usize,
}

impl ProtectedSet {
    /// Build the set from scanner output.
    pub fn from_paths(paths: BTreeSet<PathBuf>) -> Self {
        Self {
            files: paths.into_iter().map(SourceFile::new).collect(),
        }
    }

    /// Number of files in the set.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate the files in path order.
    pub fn iter(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter()
    }

    /// Lock every file in the set.
    ///
    /// Failures are collected, not fatal; the iteration is exhaustive.
    pub fn lock_all(&self) -> BulkOutcome {
        self.apply(SourceFile::lock)
    }

    /// Unlock every file in the set.
    pub fn unlock_all(&self) -> BulkOutcome {
        self.apply(SourceFile::unlock)
    }

    /// Tally the current lock state of every file.
    pub fn summarize(&self) -> LockSummary {
        let mut summary = LockSummary::default();
        for file in &self.files {
            match file.is_locked() {
                Ok(true) => summary.locked += 1,
                Ok(false) => summary.unlocked += 1,
                Err(_) => summary.unknown += 1,
            }
        }
        summary
    }

    fn apply(&self, op: fn(&SourceFile) -> Result<()>) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for file in &self.files {
            match op(file) {
                Ok(()) => outcome.succeeded += 1,
                Err(e) => outcome.failed.push(BulkFailure {
                    path: file.path().to_path_buf(),
                    reason: e.to_string(),
                }),
            }
        }
        outcome
    }
}
