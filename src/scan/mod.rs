//! Workspace layout detection and source file discovery.
//!
//! A workspace is a user-chosen root directory in one of two shapes:
//!
//! - **Single project**: the root itself contains exactly one child named
//!   `src`; sources live under `root/src`.
//! - **Multi project**: each eligible child of the root is a candidate
//!   project with its own `<child>/src`.
//!
//! Under a source root, sources either sit directly in the directory or are
//! grouped one level deep into package directories. Every entry is classified
//! individually; entries that are neither a source file nor a package produce
//! a warning and are skipped. Tooling-generated entries (names containing the
//! configured metadata marker), names containing a `.`, and entries matching
//! the exclude globs are never treated as projects.
//!
//! Scanning never mutates the filesystem. Results are canonicalized and
//! deduplicated, so the same final set comes back regardless of layout.

use crate::config::ScanConfig;
use crate::error::{HaspError, Result};
use globset::GlobSet;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};


/// Name of the source root directory that identifies a project.
const SOURCE_ROOT: &str = "src";

/// A directory entry captured during a scan.
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Discovers source files under a workspace root.
#[derive(Debug)]
pub struct WorkspaceScanner {
    root: PathBuf,
    source_suffix: String,
    exclude: GlobSet,
    metadata_marker: String,
}

impl WorkspaceScanner {
    /// Create a scanner for the given root with the given scan settings.
    ///
    /// Fails only if the configured exclude patterns do not compile; the root
    /// itself is not validated until [`scan`](Self::scan) runs.
    pub fn new<P: Into<PathBuf>>(root: P, config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            source_suffix: format!(".{}", config.source_extension),
            exclude: config.exclude_set()?,
            metadata_marker: config.metadata_marker.clone(),
        })
    }

    /// The workspace root this scanner walks.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discover all source files under the workspace root.
    ///
    /// Deterministic for a given filesystem state. An unreadable root is an
    /// I/O error; unreadable or missing subdirectories contribute an empty
    /// branch instead of aborting the walk.
    pub fn scan(&self) -> Result<BTreeSet<PathBuf>> {
        let children = list_entries(&self.root).map_err(|e| {
            HaspError::Io(format!(
                "failed to read workspace root '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        let children: Vec<Entry> = children
            .into_iter()
            .filter(|c| !c.name.contains(&self.metadata_marker))
            .collect();

        let mut files = BTreeSet::new();

        // Exactly one child named `src` means the root is itself a project.
        let src_count = children.iter().filter(|c| c.name == SOURCE_ROOT).count();
        if src_count == 1 {
            self.collect_source_root(&self.root.join(SOURCE_ROOT), &mut files);
            return Ok(files);
        }

        for child in &children {
            if !child.is_dir || child.name.contains('.') || self.exclude.is_match(&child.name) {
                continue;
            }
            self.collect_source_root(&child.path.join(SOURCE_ROOT), &mut files);
        }

        Ok(files)
    }

    /// Collect source files under one source root.
    ///
    /// Files with the source extension are taken directly; directories are
    /// packages whose file children are taken. Anything else is warned about
    /// and skipped. A missing or unreadable source root yields nothing.
    fn collect_source_root(&self, src_dir: &Path, out: &mut BTreeSet<PathBuf>) {
        let entries = match list_entries(src_dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };

        for entry in entries {
            if entry.is_dir {
                for child in list_entries(&entry.path).unwrap_or_default() {
                    if !child.is_dir && self.is_source_name(&child.name) {
                        out.insert(canonical(child.path));
                    } else {
                        eprintln!(
                            "warning: skipping unclassified entry '{}'",
                            child.path.display()
                        );
                    }
                }
            } else if self.is_source_name(&entry.name) {
                out.insert(canonical(entry.path));
            } else {
                eprintln!(
                    "warning: skipping unclassified entry '{}'",
                    entry.path.display()
                );
            }
        }
    }

    fn is_source_name(&self, name: &str) -> bool {
        name.ends_with(&self.source_suffix)
    }
}

/// List a directory's entries, sorted by name for deterministic traversal.
fn list_entries(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path,
            is_dir,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Canonicalize a discovered path; identical files dedupe to one entry.
fn canonical(path: PathBuf) -> PathBuf {
    fs::canonicalize(&path).unwrap_or(path)
}
