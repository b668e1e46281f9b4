//! Write-protection subsystem for hasp.
//!
//! Discovered source files are wrapped in [`SourceFile`] values and grouped
//! into a [`ProtectedSet`]. Locking a file clears its OS write-permission
//! bits; unlocking restores owner write permission. No lock state is cached:
//! every query goes back to the filesystem.
//!
//! Bulk operations iterate the whole set and never stop early. A failed file
//! is recorded in the [`BulkOutcome`] and the loop continues, so partial lock
//! states across a workspace are an expected result of a failed batch rather
//! than an invariant violation.

mod set;
mod source_file;


pub use set::{BulkFailure, BulkOutcome, LockSummary, ProtectedSet};
pub use source_file::SourceFile;
