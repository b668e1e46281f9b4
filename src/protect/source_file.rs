//! A single lockable source file.

use crate::error::{HaspError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// One discovered source file, identified by its canonical path.
///
/// Equality and ordering follow the path alone; lock state is a property of
/// the filesystem, not of this value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    path: PathBuf,
}

impl SourceFile {
    /// Wrap a path. The scanner hands over canonicalized paths, so two values
    /// for the same file compare equal.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The underlying path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make the file read-only by clearing its write-permission bits.
    pub fn lock(&self) -> Result<()> {
        self.set_writable(false)
    }

    /// Restore owner write permission.
    pub fn unlock(&self) -> Result<()> {
        self.set_writable(true)
    }

    /// Whether the file is currently write-protected.
    ///
    /// Always a fresh metadata query.
    pub fn is_locked(&self) -> Result<bool> {
        let metadata = fs::metadata(&self.path).map_err(|e| {
            HaspError::Io(format!(
                "failed to read metadata for '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(metadata.permissions().readonly())
    }

    #[cfg(unix)]
    fn set_writable(&self, writable: bool) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(&self.path).map_err(|e| {
            HaspError::Io(format!(
                "failed to read metadata for '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let mut permissions = metadata.permissions();
        let mode = permissions.mode();
        // Locking strips every write bit; unlocking grants owner write only.
        let new_mode = if writable {
            mode | 0o200
        } else {
            mode & !0o222
        };
        permissions.set_mode(new_mode);

        fs::set_permissions(&self.path, permissions).map_err(|e| {
            HaspError::Io(format!(
                "failed to change permissions for '{}': {}",
                self.path.display(),
                e
            ))
        })
    }

    #[cfg(not(unix))]
    fn set_writable(&self, writable: bool) -> Result<()> {
        let metadata = fs::metadata(&self.path).map_err(|e| {
            HaspError::Io(format!(
                "failed to read metadata for '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        let mut permissions = metadata.permissions();
        permissions.set_readonly(!writable);

        fs::set_permissions(&self.path, permissions).map_err(|e| {
            HaspError::Io(format!(
                "failed to change permissions for '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
