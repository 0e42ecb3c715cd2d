// src/watch/probe.rs

//! Reading `mtime` / `size` for a single path.

use std::path::Path;

use tracing::{debug, trace};

use crate::fs::{FileMetadata, FileSystem};

/// Bytes read from the head of a file to force the OS to revalidate it.
pub const CACHE_BUST_PREFIX_BYTES: usize = 64;

/// Stat `path`, returning `None` if it is missing or not a regular file.
///
/// With `bust_cache` set, [`bust_cache`] runs first so that network or synced
/// drives report fresh metadata instead of a cached stat.
///
/// A failed stat is treated the same as a missing file: the entry drops out
/// of this cycle's snapshot and is probed again next cycle.
pub fn probe(fs: &dyn FileSystem, path: &Path, bust_cache: bool) -> Option<FileMetadata> {
    if bust_cache {
        self::bust_cache(fs, path);
    }

    if !fs.is_file(path) {
        debug!(path = ?path, "probe: not found");
        return None;
    }

    match fs.metadata(path) {
        Ok(meta) => Some(meta),
        Err(err) => {
            debug!(path = ?path, error = %err, "probe: stat failed; treating as not found");
            None
        }
    }
}

/// Best-effort invalidation of cached metadata for `path`.
///
/// Lists the parent directory and reads a small prefix of the file. Both
/// steps may fail (permissions, file vanished, platform quirks); failures are
/// swallowed.
pub fn bust_cache(fs: &dyn FileSystem, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(err) = fs.read_dir(parent) {
            trace!(path = ?parent, error = %err, "cache bust: directory listing failed");
        }
    }
    if let Err(err) = fs.read_prefix(path, CACHE_BUST_PREFIX_BYTES) {
        trace!(path = ?path, error = %err, "cache bust: prefix read failed");
    }
}
