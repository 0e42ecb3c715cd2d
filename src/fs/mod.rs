// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

pub mod mock;

/// The two pieces of metadata change detection cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileMetadata {
    /// Modification time, seconds since the Unix epoch.
    pub mtime: f64,
    /// Length in bytes.
    pub size: u64,
}

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    fn metadata(&self, path: &Path) -> Result<FileMetadata>;
    fn is_file(&self, path: &Path) -> bool;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Read at most `len` bytes from the start of a file.
    fn read_prefix(&self, path: &Path, len: usize) -> Result<Vec<u8>>;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn metadata(&self, path: &Path) -> Result<FileMetadata> {
        let meta = fs::metadata(path).with_context(|| format!("stat {:?}", path))?;
        let modified = meta
            .modified()
            .with_context(|| format!("reading mtime of {:?}", path))?;
        Ok(FileMetadata {
            mtime: epoch_seconds(modified),
            size: meta.len(),
        })
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("canonicalizing {:?}", path))
    }

    fn read_prefix(&self, path: &Path, len: usize) -> Result<Vec<u8>> {
        let file = fs::File::open(path).with_context(|| format!("opening file {:?}", path))?;
        let mut buf = Vec::with_capacity(len);
        file.take(len as u64)
            .read_to_end(&mut buf)
            .with_context(|| format!("reading prefix of {:?}", path))?;
        Ok(buf)
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        Ok(entries)
    }
}

/// Convert a `SystemTime` to fractional seconds since the Unix epoch.
///
/// Timestamps before the epoch come out negative rather than failing.
pub fn epoch_seconds(t: SystemTime) -> f64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

/// Current wall-clock time as epoch seconds.
pub fn now_epoch_seconds() -> f64 {
    epoch_seconds(SystemTime::now())
}
