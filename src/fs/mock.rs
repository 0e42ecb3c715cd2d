// src/fs/mock.rs

use super::{FileMetadata, FileSystem};
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File { content: Vec<u8>, mtime: f64 },
    Dir(Vec<String>), // List of child names
}

/// In-memory filesystem with explicit control over mtimes.
///
/// Clones share state, so a test can keep one handle while the code under
/// test owns another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    /// Paths whose cache-busting reads (prefix read / parent listing) fail.
    bust_failures: Arc<Mutex<HashSet<PathBuf>>>,
    prefix_reads: Arc<AtomicUsize>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        // Ensure root exists
        files.insert(PathBuf::from("/"), MockEntry::Dir(Vec::new()));

        Self {
            files: Arc::new(Mutex::new(files)),
            ..Default::default()
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<PathBuf, MockEntry>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add (or overwrite) a file with the given content and mtime.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>, mtime: f64) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.entries();
        files.insert(
            path.clone(),
            MockEntry::File {
                content: content.into(),
                mtime,
            },
        );

        if let Some(parent) = path.parent() {
            let parent = if parent.as_os_str().is_empty() {
                Path::new("/")
            } else {
                parent
            };

            Self::ensure_dir_entry(&mut files, parent);
            Self::add_child(&mut files, parent, &path);
        }
    }

    /// Change only the mtime of an existing file.
    pub fn set_mtime(&self, path: impl AsRef<Path>, new_mtime: f64) {
        if let Some(MockEntry::File { mtime, .. }) = self.entries().get_mut(path.as_ref()) {
            *mtime = new_mtime;
        }
    }

    /// Replace the content of an existing file, keeping its mtime.
    pub fn set_content(&self, path: impl AsRef<Path>, new_content: impl Into<Vec<u8>>) {
        if let Some(MockEntry::File { content, .. }) = self.entries().get_mut(path.as_ref()) {
            *content = new_content.into();
        }
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut files = self.entries();
        files.remove(path);
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            let name = name.to_string_lossy().into_owned();
            if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
                children.retain(|c| *c != name);
            }
        }
    }

    /// Make cache-busting reads against `path` fail.
    pub fn fail_cache_bust(&self, path: impl AsRef<Path>) {
        self.bust_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.as_ref().to_path_buf());
    }

    /// Number of `read_prefix` calls served so far.
    pub fn prefix_reads(&self) -> usize {
        self.prefix_reads.load(Ordering::SeqCst)
    }

    fn bust_fails(&self, path: &Path) -> bool {
        self.bust_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(path)
    }

    fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if !files.contains_key(path) {
            files.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
            if let Some(parent) = path.parent() {
                if parent != path && !parent.as_os_str().is_empty() {
                    Self::ensure_dir_entry(files, parent);
                    Self::add_child(files, parent, path);
                }
            }
        }
    }

    fn add_child(files: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
        if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
            if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_string());
                }
            }
        }
    }
}

impl FileSystem for MockFileSystem {
    fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        match self.entries().get(path) {
            Some(MockEntry::File { content, mtime }) => Ok(FileMetadata {
                mtime: *mtime,
                size: content.len() as u64,
            }),
            Some(MockEntry::Dir(_)) => Ok(FileMetadata { mtime: 0.0, size: 0 }),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.entries().get(path), Some(MockEntry::File { .. }))
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        // In mock, we just return the path as is, assuming absolute paths are used in tests
        if self.entries().contains_key(path) {
            Ok(path.to_path_buf())
        } else {
            Err(anyhow!("File not found: {:?}", path))
        }
    }

    fn read_prefix(&self, path: &Path, len: usize) -> Result<Vec<u8>> {
        self.prefix_reads.fetch_add(1, Ordering::SeqCst);
        if self.bust_fails(path) {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        match self.entries().get(path) {
            Some(MockEntry::File { content, .. }) => {
                Ok(content.iter().take(len).copied().collect())
            }
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let failing = self
            .bust_failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|p| p.parent() == Some(path));
        if failing {
            return Err(anyhow!("Permission denied: {:?}", path));
        }
        match self.entries().get(path) {
            Some(MockEntry::Dir(children)) => {
                Ok(children.iter().map(|name| path.join(name)).collect())
            }
            _ => Err(anyhow!("Not a directory or not found: {:?}", path)),
        }
    }
}
