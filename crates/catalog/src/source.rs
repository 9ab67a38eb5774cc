//! Minimal "list entries / read entry" capability the catalogs iterate over.
//!
//! Catalog loaders never touch `std::fs` directly. [`FsDirectory`] backs a
//! source with a real folder, [`MemoryDirectory`] with an in-memory fixture.

use crate::error::{CatalogError, Result};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A flat collection of named entries (one directory level, files only).
pub trait EntrySource {
    /// Where the entries live; used in errors and log lines.
    fn location(&self) -> &Path;

    fn exists(&self) -> bool;

    /// File names of regular entries, sorted by name.
    ///
    /// Fails with [`CatalogError::MissingDirectory`] when the source is absent.
    fn list_entries(&self) -> Result<Vec<String>>;

    /// Raw bytes of one entry.
    fn read_entry(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Entry source backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsDirectory {
    root: PathBuf,
}

impl FsDirectory {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl EntrySource for FsDirectory {
    fn location(&self) -> &Path {
        &self.root
    }

    fn exists(&self) -> bool {
        self.root.is_dir()
    }

    fn list_entries(&self) -> Result<Vec<String>> {
        if !self.exists() {
            return Err(CatalogError::MissingDirectory {
                path: self.root.clone(),
            });
        }

        let mut names = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for result in walker {
            match result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
                Err(e) if e.depth() == 0 => {
                    return Err(CatalogError::ListDirectory {
                        path: self.root.clone(),
                        source: e.into(),
                    });
                }
                Err(e) => log::warn!("Failed to read entry in {}: {e}", self.root.display()),
            }
        }

        log::debug!("Found {} files in {}", names.len(), self.root.display());
        Ok(names)
    }

    fn read_entry(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(name))
    }
}

#[derive(Debug, Clone)]
enum MemoryEntry {
    Bytes(Vec<u8>),
    Unreadable(String),
}

/// In-memory entry source for tests and embedding callers.
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    location: PathBuf,
    present: bool,
    entries: BTreeMap<String, MemoryEntry>,
}

impl MemoryDirectory {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            present: true,
            entries: BTreeMap::new(),
        }
    }

    /// A source that reports itself as missing.
    pub fn absent(location: impl Into<PathBuf>) -> Self {
        Self {
            present: false,
            ..Self::new(location)
        }
    }

    pub fn with_file(self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.with_bytes(name, content.into().into_bytes())
    }

    pub fn with_bytes(mut self, name: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.entries.insert(name.into(), MemoryEntry::Bytes(bytes));
        self
    }

    /// An entry that is listed but fails to read.
    pub fn with_unreadable(mut self, name: impl Into<String>, reason: impl Into<String>) -> Self {
        self.entries
            .insert(name.into(), MemoryEntry::Unreadable(reason.into()));
        self
    }
}

impl EntrySource for MemoryDirectory {
    fn location(&self) -> &Path {
        &self.location
    }

    fn exists(&self) -> bool {
        self.present
    }

    fn list_entries(&self) -> Result<Vec<String>> {
        if !self.present {
            return Err(CatalogError::MissingDirectory {
                path: self.location.clone(),
            });
        }
        Ok(self.entries.keys().cloned().collect())
    }

    fn read_entry(&self, name: &str) -> io::Result<Vec<u8>> {
        match self.entries.get(name) {
            Some(MemoryEntry::Bytes(bytes)) => Ok(bytes.clone()),
            Some(MemoryEntry::Unreadable(reason)) => Err(io::Error::other(reason.clone())),
            None => Err(io::Error::new(io::ErrorKind::NotFound, name.to_string())),
        }
    }
}

/// Read an entry as UTF-8 text, folding decode failures into `io::Error`.
pub(crate) fn read_text(source: &dyn EntrySource, name: &str) -> io::Result<String> {
    let bytes = source.read_entry(name)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn fs_directory_lists_files_sorted_and_skips_subdirs() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("b.md"), "b").unwrap();
        fs::write(temp.path().join("a.md"), "a").unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested").join("c.md"), "c").unwrap();

        let source = FsDirectory::new(temp.path());
        assert_eq!(source.list_entries().unwrap(), vec!["a.md", "b.md"]);
        assert_eq!(source.read_entry("a.md").unwrap(), b"a".to_vec());
    }

    #[test]
    fn fs_directory_missing_is_fatal() {
        let temp = tempdir().unwrap();
        let source = FsDirectory::new(temp.path().join("nope"));
        assert!(!source.exists());
        assert!(matches!(
            source.list_entries(),
            Err(CatalogError::MissingDirectory { .. })
        ));
    }

    #[test]
    fn memory_directory_reports_failures() {
        let source = MemoryDirectory::new("fixture")
            .with_file("1.md", "# One")
            .with_bytes("2.md", vec![0xff, 0xfe])
            .with_unreadable("3.md", "permission denied");

        assert_eq!(read_text(&source, "1.md").unwrap(), "# One");
        assert_eq!(
            read_text(&source, "2.md").unwrap_err().kind(),
            io::ErrorKind::InvalidData
        );
        assert!(read_text(&source, "3.md").is_err());
        assert!(MemoryDirectory::absent("gone").list_entries().is_err());
    }
}
