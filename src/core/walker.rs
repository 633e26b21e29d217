//! Source file discovery for javast
//!
//! This module provides the FileWalker trait and the default suffix-matching
//! implementation used by the pipeline.

use crate::core::error::{DumpError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::DirEntry;

#[cfg(test)]
use mockall::automock;

/// Trait for source file discovery
///
/// This trait allows for mocking in tests and alternative implementations
/// (e.g., file lists read from a manifest).
#[cfg_attr(test, automock)]
pub trait FileWalker: Send + Sync {
    /// Every regular file under `root` whose name ends with `suffix`
    ///
    /// Fails only when `root` is not an existing directory; zero matches is
    /// an empty vector.
    fn discover(&self, root: &Path, suffix: &str) -> Result<Vec<PathBuf>>;
}

/// Whether a file name ends with `suffix`, compared byte for byte
pub fn matches_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| name.as_encoded_bytes().ends_with(suffix.as_bytes()))
        .unwrap_or(false)
}

/// Check the scan root before walking it
pub fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(DumpError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(DumpError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Recursive walker matching file names by suffix
///
/// Directory entries are visited in file-name order, so the output is the
/// same on every run over an unchanged tree. Symlinked directories are not
/// descended; a symlink whose target is a regular file is reported under its
/// own name. Dangling links are reported too.
#[derive(Debug, Clone, Default)]
pub struct SuffixWalker {
    ignore_dirs: Vec<String>,
}

impl SuffixWalker {
    /// Create a new SuffixWalker
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip directories with any of these names (below the root)
    pub fn with_ignore_dirs(mut self, ignore_dirs: Vec<String>) -> Self {
        self.ignore_dirs = ignore_dirs;
        self
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .map(|name| self.ignore_dirs.iter().any(|d| d == name))
                .unwrap_or(false)
    }
}

impl FileWalker for SuffixWalker {
    fn discover(&self, root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
        check_root(root)?;

        let mut files = Vec::new();
        let walker = walkdir::WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_ignored(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };

            if is_source_file(&entry) && matches_suffix(entry.path(), suffix) {
                files.push(entry.into_path());
            }
        }

        debug!(root = %root.display(), suffix, count = files.len(), "discovery finished");
        Ok(files)
    }
}

/// Regular files, plus links that do not resolve to a directory
///
/// A dangling link is kept; reading it fails later as a per-file error.
fn is_source_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        !entry.path().is_dir()
    } else {
        entry.file_type().is_file()
    }
}
