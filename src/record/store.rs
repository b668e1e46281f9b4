//! Durable storage for the account record.

use super::{AccountRecord, LockStatus, RecordField};
use crate::error::{HaspError, Result};
use crate::fs::atomic_write_file;
use std::path::{Path, PathBuf};

/// Loads and rewrites the account record file.
///
/// Every mutation goes through the same sequence: build the full three-field
/// content in memory, replace the file in one atomic rename, then re-read it
/// from disk. Memory is a pure cache of disk state; the file is never
/// observable with fewer than three fields.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Create a store for the record at the given path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The record file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a record file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the record from disk.
    pub fn load(&self) -> Result<AccountRecord> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            HaspError::Io(format!(
                "failed to read account record '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        AccountRecord::parse(&content)
    }

    /// Write an initial record.
    ///
    /// Provisioning only; refuses to clobber an existing record.
    pub fn create(&self, record: &AccountRecord) -> Result<()> {
        if self.exists() {
            return Err(HaspError::UserError(format!(
                "account record '{}' already exists",
                self.path.display()
            )));
        }
        atomic_write_file(&self.path, &record.to_file_string())
    }

    /// Durably replace one field of the record.
    ///
    /// The other two fields are carried over from the record currently on
    /// disk. Returns the freshly reloaded record, so the caller's view is
    /// what the file now actually contains.
    pub fn replace_field(&self, field: RecordField, new_value: &str) -> Result<AccountRecord> {
        let current = self.load()?;

        let updated = match field {
            RecordField::Identity => {
                AccountRecord::new(new_value, &current.secret, current.status)?
            }
            RecordField::Secret => {
                AccountRecord::new(&current.identity, new_value, current.status)?
            }
            RecordField::Status => {
                let status = LockStatus::parse(new_value).ok_or_else(|| {
                    HaspError::UserError(format!(
                        "invalid status '{}': expected 'locked' or 'unlocked'",
                        new_value
                    ))
                })?;
                AccountRecord::new(&current.identity, &current.secret, status)?
            }
        };

        atomic_write_file(&self.path, &updated.to_file_string())?;
        self.load()
    }

    /// Record the aggregate outcome of a bulk operation.
    pub fn set_status(&self, status: LockStatus) -> Result<AccountRecord> {
        self.replace_field(RecordField::Status, status.as_str())
    }
}
