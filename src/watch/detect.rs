// src/watch/detect.rs

//! Comparing two snapshots.

use crate::watch::snapshot::{WatchSet, WatchedEntry};

/// True if `current` should be treated as a modified version of `previous`.
///
/// The mtime must strictly increase. Equal mtimes only count as a change if
/// the size moved, which keeps coarse-resolution filesystems from reporting
/// false positives.
pub fn has_changed(previous: &WatchedEntry, current: &WatchedEntry) -> bool {
    current.mtime > previous.mtime || current.size != previous.size
}

/// Entries of `current` that changed relative to `previous`, sorted by path.
///
/// Only paths present in both snapshots are considered. Newly linked files
/// have no baseline and are not reported; files that disappeared are dropped.
pub fn diff(previous: &WatchSet, current: &WatchSet) -> Vec<WatchedEntry> {
    let mut changed: Vec<WatchedEntry> = current
        .iter()
        .filter(|cur| {
            previous
                .get(&cur.path)
                .is_some_and(|prev| has_changed(prev, cur))
        })
        .cloned()
        .collect();
    changed.sort_by(|a, b| a.path.cmp(&b.path));
    changed
}
