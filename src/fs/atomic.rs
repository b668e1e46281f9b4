//! Atomic file replacement.
//!
//! All durable state updates follow the same pattern:
//! 1. Write the new content to a temporary file in the target's directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename the temporary file over the target
//!
//! The rename replaces the destination in one step, so there is no window in
//! which the target file is absent or truncated. On crash, a leftover
//! `.{filename}.tmp` file may remain next to the target; it is overwritten by
//! the next write.
//!
//! Source and destination must live on the same filesystem for the rename to
//! be atomic.

use crate::error::{HaspError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file.
///
/// Writes the content to a temporary sibling file, syncs it, and renames it
/// over the target. The target is never observable in a partial state.
///
/// # Arguments
///
/// * `path` - The target file path
/// * `content` - The bytes to write
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            HaspError::Io(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;
    replace_file(&temp_path, path)?;

    Ok(())
}

/// Atomically write a string to a file.
///
/// Convenience wrapper around `atomic_write` for string content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Temporary sibling path for the target: `.{filename}.tmp` in the same directory.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| HaspError::Io(format!("invalid file path '{}'", target.display())))?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write content to a file and sync it to disk.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        HaspError::Io(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        HaspError::Io(format!("failed to write to temporary file: {}", e))
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        HaspError::Io(format!("failed to sync temporary file to disk: {}", e))
    })?;

    Ok(())
}

/// Rename the source file over the target in one step.
///
/// On POSIX, `rename()` replaces an existing destination atomically. The
/// parent directory is synced afterwards so the directory entry itself is
/// durable.
#[cfg(unix)]
fn replace_file(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        HaspError::Io(format!(
            "failed to replace '{}': {}",
            target.display(),
            e
        ))
    })?;

    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Replace the target file with the source file on non-POSIX platforms.
///
/// `std::fs::rename` refuses to overwrite an existing destination on Windows,
/// so the destination is removed first. This reintroduces a brief window with
/// no target file; POSIX is the primary target and gets the stronger guarantee.
#[cfg(not(unix))]
fn replace_file(source: &Path, target: &Path) -> Result<()> {
    if target.exists() {
        fs::remove_file(target).map_err(|e| {
            let _ = fs::remove_file(source);
            HaspError::Io(format!("failed to remove '{}': {}", target.display(), e))
        })?;
    }

    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        HaspError::Io(format!("failed to replace '{}': {}", target.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("record.dat");

        atomic_write(&file_path, b"alice\nhunter2\nunlocked\n").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "alice\nhunter2\nunlocked\n");
    }

    #[test]
    fn atomic_write_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("record.dat");

        fs::write(&file_path, "original content").unwrap();
        atomic_write(&file_path, b"new content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "new content");
    }

    #[test]
    fn atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nested").join("state").join("record.dat");

        atomic_write(&file_path, b"nested").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "nested");
    }

    #[test]
    fn atomic_write_cleans_up_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("record.dat");

        atomic_write(&file_path, b"content").unwrap();

        let temp_path = temp_dir.path().join(".record.dat.tmp");
        assert!(!temp_path.exists());
    }

    #[test]
    fn atomic_write_empty_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.dat");

        atomic_write(&file_path, b"").unwrap();

        assert!(fs::read(&file_path).unwrap().is_empty());
    }

    #[test]
    fn temp_path_is_sibling_of_target() {
        let target = Path::new("/some/path/record.dat");
        let temp = temp_path_for(target).unwrap();

        assert_eq!(temp.parent().unwrap(), Path::new("/some/path"));
        let name = temp.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with('.'));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn atomic_write_string_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("record.dat");

        atomic_write_file(&file_path, "line one\nline two\n").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "line one\nline two\n");
    }
}
