// src/watch/mod.rs

//! Change detection for externally-linked files.
//!
//! This module is responsible for:
//! - Resolving host source paths to absolute paths (`path_utils`).
//! - Probing `mtime` / `size`, optionally busting the OS metadata cache
//!   first (`probe`).
//! - Building whole-snapshot [`WatchSet`]s from the host's resource list
//!   (`snapshot`).
//! - Diffing two snapshots (`detect`).
//!
//! It does **not** decide when to check or reload anything; that lives in
//! the engine.

pub mod detect;
pub mod path_utils;
pub mod probe;
pub mod snapshot;

pub use detect::{diff, has_changed};
pub use path_utils::resolve_source_path;
pub use probe::{bust_cache, probe, CACHE_BUST_PREFIX_BYTES};
pub use snapshot::{rebuild, WatchSet, WatchedEntry};
