//! Where content documents come from.
//!
//! The pipeline never touches `std::fs` directly; it asks a [`ContentSource`]
//! for a sorted listing and for file contents. [`FsSource`] walks a directory
//! on disk, [`MemorySource`] holds an in-memory file set for tests and
//! embedding.

use crate::error::IndexError;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A corpus of documents addressed by root-relative, `/`-separated paths.
pub trait ContentSource {
    /// Corpus root, used for file identifiers in diagnostics.
    fn root(&self) -> &Path;

    /// All files in the corpus, sorted by relative path.
    ///
    /// Fails only when the corpus as a whole is unusable.
    fn list(&self) -> Result<Vec<String>, IndexError>;

    /// Read one file as UTF-8.
    fn read(&self, rel: &str) -> io::Result<String>;

    /// Identifier shown to the operator for `rel`.
    fn file_id(&self, rel: &str) -> String {
        self.root().join(rel).display().to_string()
    }
}

// ============================================================================
// Filesystem
// ============================================================================

/// Directory on disk. Non-recursive unless asked otherwise.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
    recursive: bool,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
        }
    }

    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    fn check_root(&self) -> Result<(), IndexError> {
        let meta = match std::fs::metadata(&self.root) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(IndexError::RootMissing(self.root.clone()));
            }
            Err(e) => return Err(IndexError::RootUnreadable(self.root.clone(), e)),
        };
        if !meta.is_dir() {
            return Err(IndexError::RootNotDirectory(self.root.clone()));
        }
        std::fs::read_dir(&self.root)
            .map(drop)
            .map_err(|e| IndexError::RootUnreadable(self.root.clone(), e))
    }
}

impl ContentSource for FsSource {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list(&self) -> Result<Vec<String>, IndexError> {
        self.check_root()?;

        let mut walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name();
        if !self.recursive {
            walker = walker.max_depth(1);
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| IndexError::Walk(self.root.clone(), e))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let rel: Vec<_> = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect();
            files.push(rel.join("/"));
        }
        files.sort();
        Ok(files)
    }

    fn read(&self, rel: &str) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(rel))
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// In-memory file set keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    root: PathBuf,
    files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: BTreeMap::new(),
        }
    }

    /// Add or replace a file.
    pub fn insert(&mut self, rel: impl Into<String>, content: impl Into<String>) {
        self.files.insert(rel.into(), content.into());
    }

    pub fn with(mut self, rel: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(rel, content);
        self
    }

    pub fn remove(&mut self, rel: &str) -> Option<String> {
        self.files.remove(rel)
    }
}

impl ContentSource for MemorySource {
    fn root(&self) -> &Path {
        &self.root
    }

    fn list(&self) -> Result<Vec<String>, IndexError> {
        Ok(self.files.keys().cloned().collect())
    }

    fn read(&self, rel: &str) -> io::Result<String> {
        self.files
            .get(rel)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such file: {rel}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fs_source_lists_sorted_top_level() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.b.mdx"), "b").unwrap();
        fs::write(dir.path().join("notes.a.mdx"), "a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/notes.c.mdx"), "c").unwrap();

        let source = FsSource::new(dir.path());
        assert_eq!(source.list().unwrap(), vec!["notes.a.mdx", "notes.b.mdx"]);
        assert_eq!(source.read("notes.b.mdx").unwrap(), "b");
    }

    #[test]
    fn test_fs_source_recursive() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.a.mdx"), "a").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/notes.c.mdx"), "c").unwrap();

        let source = FsSource::new(dir.path()).recursive(true);
        assert_eq!(source.list().unwrap(), vec!["nested/notes.c.mdx", "notes.a.mdx"]);
        assert_eq!(source.read("nested/notes.c.mdx").unwrap(), "c");
    }

    #[test]
    fn test_fs_source_missing_root() {
        let dir = TempDir::new().unwrap();
        let source = FsSource::new(dir.path().join("missing"));
        assert!(matches!(source.list(), Err(IndexError::RootMissing(_))));
    }

    #[test]
    fn test_fs_source_root_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let source = FsSource::new(&file);
        assert!(matches!(source.list(), Err(IndexError::RootNotDirectory(_))));
    }

    #[test]
    fn test_memory_source() {
        let mut source = MemorySource::new("app/routes")
            .with("notes.b.mdx", "b")
            .with("notes.a.mdx", "a");
        assert_eq!(source.list().unwrap(), vec!["notes.a.mdx", "notes.b.mdx"]);
        assert_eq!(source.read("notes.a.mdx").unwrap(), "a");
        assert_eq!(source.file_id("notes.a.mdx"), "app/routes/notes.a.mdx");

        source.remove("notes.a.mdx");
        assert_eq!(
            source.read("notes.a.mdx").unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}
