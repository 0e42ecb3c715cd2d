// src/watch/path_utils.rs

//! Resolving host source paths to absolute filesystem paths.

use std::path::{Path, PathBuf};

/// Prefix marking a path as relative to the project root.
pub const PROJECT_RELATIVE_PREFIX: &str = "//";

/// Turn a host-provided source path into an absolute path.
///
/// - Empty (or whitespace-only) paths resolve to `None`.
/// - `//textures/wood.png` is relative to `root`.
/// - Other relative paths are relative to `root` as well.
/// - Absolute paths are returned unchanged.
///
/// Without a `root`, relative paths are resolved against the current working
/// directory. Nothing here touches the filesystem; canonicalization happens
/// later, through the `FileSystem` abstraction.
pub fn resolve_source_path(raw: &str, root: Option<&Path>) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let base = || -> PathBuf {
        match root {
            Some(r) => r.to_path_buf(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    };

    // Checked before `is_absolute`: on Unix "//x" counts as absolute.
    if let Some(rest) = raw.strip_prefix(PROJECT_RELATIVE_PREFIX) {
        let rest = rest.trim_start_matches(['/', '\\']);
        if rest.is_empty() {
            return None;
        }
        return Some(base().join(rest));
    }

    let path = Path::new(raw);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(base().join(path))
    }
}
