// src/watch/snapshot.rs

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::fs::FileSystem;
use crate::host::{LinkedResource, Reloadable};
use crate::watch::path_utils::resolve_source_path;
use crate::watch::probe::probe;

/// A watched file together with the metadata seen when it was last probed.
#[derive(Debug, Clone)]
pub struct WatchedEntry {
    /// Absolute, canonical path. Unique within a [`WatchSet`].
    pub path: PathBuf,
    pub resource: Arc<dyn Reloadable>,
    pub resource_name: String,
    pub mtime: f64,
    pub size: u64,
}

/// Snapshot of every watched file, keyed by absolute path.
///
/// A `WatchSet` is always rebuilt as a whole (see [`rebuild`]) and swapped in
/// place of the previous one; it is never patched entry by entry.
#[derive(Debug, Clone, Default)]
pub struct WatchSet {
    entries: HashMap<PathBuf, WatchedEntry>,
}

impl WatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&WatchedEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Insert an entry, keeping the existing one if the path is already present.
    ///
    /// Returns `false` when the path was a duplicate.
    pub fn insert(&mut self, entry: WatchedEntry) -> bool {
        if self.entries.contains_key(&entry.path) {
            return false;
        }
        self.entries.insert(entry.path.clone(), entry);
        true
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WatchedEntry> {
        self.entries.values()
    }

    /// Entries ordered by path, for stable display and dispatch order.
    pub fn sorted(&self) -> Vec<&WatchedEntry> {
        let mut out: Vec<&WatchedEntry> = self.entries.values().collect();
        out.sort_by(|a, b| a.path.cmp(&b.path));
        out
    }
}

impl FromIterator<WatchedEntry> for WatchSet {
    fn from_iter<I: IntoIterator<Item = WatchedEntry>>(iter: I) -> Self {
        let mut set = WatchSet::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

/// Build a fresh snapshot from the host's current resource list.
///
/// Resources with an empty path, or whose path does not resolve to an
/// existing file, are left out silently. `bust_cache` is forwarded to the
/// probe for every resource.
pub fn rebuild(
    fs: &dyn FileSystem,
    resources: &[LinkedResource],
    project_root: Option<&Path>,
    bust_cache: bool,
) -> WatchSet {
    let mut set = WatchSet::new();

    for res in resources {
        let Some(resolved) = resolve_source_path(&res.source_path, project_root) else {
            debug!(resource = %res.name, "skipping resource without a source path");
            continue;
        };
        let path = fs.canonicalize(&resolved).unwrap_or(resolved);

        let Some(meta) = probe(fs, &path, bust_cache) else {
            debug!(resource = %res.name, path = ?path, "skipping unresolvable resource");
            continue;
        };

        let inserted = set.insert(WatchedEntry {
            path: path.clone(),
            resource: Arc::clone(&res.handle),
            resource_name: res.name.clone(),
            mtime: meta.mtime,
            size: meta.size,
        });
        if !inserted {
            debug!(resource = %res.name, path = ?path, "path already watched by another resource");
        }
    }

    debug!(entries = set.len(), "rebuilt watch set");
    set
}
