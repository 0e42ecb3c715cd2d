// src/host/mod.rs

//! Capability interfaces the core needs from its host application.
//!
//! The core never talks to a concrete host API. A host adapter implements:
//! - [`ResourceCatalog`]: the live list of externally-linked resources, each
//!   carrying a [`Reloadable`] handle,
//! - [`RedrawRequester`]: a no-argument "please redraw" trigger,
//! - [`Notifier`]: the channel user-facing messages are reported through.
//!
//! [`manifest`] contains the reference adapter used by the `linksync` binary.

use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

pub mod manifest;

pub use manifest::{watch_manifest, ManifestHost, ManifestWatcher};

/// A resource the host can reload in place from its source file.
pub trait Reloadable: Send + Sync + Debug {
    fn reload(&self) -> anyhow::Result<()>;
}

/// One externally-linked resource as enumerated by the host.
///
/// `handle` is shared with the host; the core only keeps a reference to it
/// for the lifetime of a snapshot.
#[derive(Debug, Clone)]
pub struct LinkedResource {
    pub name: String,
    /// Source path as the host stores it. May be empty or project-relative.
    pub source_path: String,
    pub handle: Arc<dyn Reloadable>,
}

impl LinkedResource {
    pub fn new(
        name: impl Into<String>,
        source_path: impl Into<String>,
        handle: Arc<dyn Reloadable>,
    ) -> Self {
        Self {
            name: name.into(),
            source_path: source_path.into(),
            handle,
        }
    }
}

pub trait ResourceCatalog {
    /// Directory that relative source paths are resolved against.
    fn project_root(&self) -> Option<PathBuf>;

    fn linked_resources(&self) -> Vec<LinkedResource>;

    /// Re-read the host's resource list, if the host caches one.
    fn refresh(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub trait RedrawRequester {
    fn request_redraw(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Everything the scheduler needs from a host, in one bound.
pub trait Host: ResourceCatalog + RedrawRequester + Notifier {}

impl<T> Host for T where T: ResourceCatalog + RedrawRequester + Notifier + ?Sized {}
