// src/host/manifest.rs

//! Reference host adapter backed by a TOML manifest.
//!
//! The "host application" here is the `linksync` binary itself: linked
//! resources come from `[resource.<name>]` sections, reloads run a shell
//! command or re-read the file, redraws are counted and logged, and notices
//! go to the log.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::{load_and_validate, manifest_root_dir, ConfigFile};
use crate::engine::ControlEvent;
use crate::errors::Result;
use crate::exec::{CommandReload, InMemoryReload};
use crate::host::{
    LinkedResource, NoticeLevel, Notifier, RedrawRequester, Reloadable, ResourceCatalog,
};
use crate::watch::resolve_source_path;

#[derive(Debug)]
pub struct ManifestHost {
    manifest_path: PathBuf,
    root: PathBuf,
    resources: Vec<LinkedResource>,
    redraws: AtomicUsize,
}

impl ManifestHost {
    /// Build a host from an already loaded manifest.
    pub fn new(manifest_path: impl Into<PathBuf>, cfg: &ConfigFile) -> Self {
        let manifest_path = manifest_path.into();
        let root = manifest_root_dir(&manifest_path);
        let resources = build_resources(&root, cfg);
        Self {
            manifest_path,
            root,
            resources,
            redraws: AtomicUsize::new(0),
        }
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Number of redraws requested so far.
    pub fn redraw_count(&self) -> usize {
        self.redraws.load(Ordering::Relaxed)
    }
}

/// Turn `[resource.<name>]` sections into linked resources.
///
/// Resources with a `reload` command get a [`CommandReload`]; the rest get an
/// [`InMemoryReload`] of their resolved path.
pub fn build_resources(root: &Path, cfg: &ConfigFile) -> Vec<LinkedResource> {
    cfg.resource
        .iter()
        .map(|(name, res)| {
            let resolved = resolve_source_path(&res.path, Some(root));
            let handle: Arc<dyn Reloadable> = match &res.reload {
                Some(cmd) => Arc::new(CommandReload::new(name, cmd, resolved)),
                None => Arc::new(InMemoryReload::new(resolved.unwrap_or_default())),
            };
            LinkedResource::new(name, &res.path, handle)
        })
        .collect()
}

impl ResourceCatalog for ManifestHost {
    fn project_root(&self) -> Option<PathBuf> {
        Some(self.root.clone())
    }

    fn linked_resources(&self) -> Vec<LinkedResource> {
        self.resources.clone()
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        let cfg = load_and_validate(&self.manifest_path)?;
        self.resources = build_resources(&self.root, &cfg);
        debug!(resources = self.resources.len(), "manifest re-read");
        Ok(())
    }
}

impl RedrawRequester for ManifestHost {
    fn request_redraw(&self) {
        let n = self.redraws.fetch_add(1, Ordering::Relaxed) + 1;
        info!(redraws = n, "redraw requested");
    }
}

impl Notifier for ManifestHost {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => info!(target: "linksync::notice", "{message}"),
            NoticeLevel::Error => error!(target: "linksync::notice", "{message}"),
        }
    }
}

/// Handle for the manifest watcher.
///
/// Dropping this handle stops watching.
pub struct ManifestWatcher {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for ManifestWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManifestWatcher").finish()
    }
}

/// Send `ControlEvent::CatalogChanged` whenever the manifest is written.
///
/// The manifest's directory is watched rather than the file, so editors that
/// save by replacing the file are still picked up. The runtime re-reads the
/// manifest on its own task; this only forwards a notification.
pub fn watch_manifest(
    manifest_path: &Path,
    control_tx: mpsc::Sender<ControlEvent>,
) -> Result<ManifestWatcher> {
    let dir = manifest_root_dir(manifest_path);
    let file_name: Option<OsString> = manifest_path.file_name().map(|n| n.to_os_string());

    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !(event.kind.is_modify() || event.kind.is_create()) {
                    return;
                }
                let touches_manifest = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if touches_manifest {
                    // A full channel already holds a pending refresh.
                    let _ = control_tx.try_send(ControlEvent::CatalogChanged);
                }
            }
            Err(err) => warn!(error = %err, "manifest watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&dir, RecursiveMode::NonRecursive)?;
    info!(path = ?manifest_path, "watching manifest for changes");

    Ok(ManifestWatcher { _inner: watcher })
}
