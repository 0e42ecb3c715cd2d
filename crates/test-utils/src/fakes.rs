use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use linksync::host::{
    LinkedResource, NoticeLevel, Notifier, RedrawRequester, Reloadable, ResourceCatalog,
};

/// A reloadable resource that:
/// - counts how often it was reloaded
/// - fails with a configurable message while `fail_with` is set.
#[derive(Debug, Default)]
pub struct FakeResource {
    name: String,
    reloads: AtomicUsize,
    failure: Mutex<Option<String>>,
}

impl FakeResource {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn failing(name: &str, message: &str) -> Self {
        let res = Self::new(name);
        res.fail_with(Some(message));
        res
    }

    pub fn fail_with(&self, message: Option<&str>) {
        *self.failure.lock().unwrap() = message.map(str::to_string);
    }

    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Reloadable for FakeResource {
    fn reload(&self) -> anyhow::Result<()> {
        if let Some(msg) = self.failure.lock().unwrap().clone() {
            return Err(anyhow!(msg));
        }
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct HostState {
    root: Option<PathBuf>,
    resources: Vec<LinkedResource>,
    /// Swapped into `resources` by the next `refresh`.
    pending: Option<Vec<LinkedResource>>,
    fail_refresh: bool,
    refreshes: usize,
    redraws: usize,
    notices: Vec<(NoticeLevel, String)>,
}

/// Host that records everything the core asks of it.
///
/// Clones share state, so a test can hand one clone to a `Runtime` and
/// inspect another.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    state: Arc<Mutex<HostState>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let host = Self::new();
        host.state.lock().unwrap().root = Some(root.into());
        host
    }

    /// Link a new `FakeResource` at `path` and return it for inspection.
    pub fn link(&self, name: &str, path: &str) -> Arc<FakeResource> {
        let res = Arc::new(FakeResource::new(name));
        self.link_resource(name, path, Arc::clone(&res));
        res
    }

    pub fn link_resource(&self, name: &str, path: &str, res: Arc<FakeResource>) {
        self.state
            .lock()
            .unwrap()
            .resources
            .push(LinkedResource::new(name, path, res));
    }

    pub fn unlink(&self, name: &str) {
        self.state.lock().unwrap().resources.retain(|r| r.name != name);
    }

    /// Resource list the next `refresh` will switch to.
    pub fn stage_refresh(&self, resources: Vec<LinkedResource>) {
        self.state.lock().unwrap().pending = Some(resources);
    }

    pub fn fail_refresh(&self, fail: bool) {
        self.state.lock().unwrap().fail_refresh = fail;
    }

    pub fn refreshes(&self) -> usize {
        self.state.lock().unwrap().refreshes
    }

    pub fn redraws(&self) -> usize {
        self.state.lock().unwrap().redraws
    }

    pub fn notices(&self) -> Vec<(NoticeLevel, String)> {
        self.state.lock().unwrap().notices.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|(level, _)| *level == NoticeLevel::Error)
            .map(|(_, msg)| msg)
            .collect()
    }

    pub fn has_notice(&self, needle: &str) -> bool {
        self.notices().iter().any(|(_, msg)| msg.contains(needle))
    }
}

impl ResourceCatalog for RecordingHost {
    fn project_root(&self) -> Option<PathBuf> {
        self.state.lock().unwrap().root.clone()
    }

    fn linked_resources(&self) -> Vec<LinkedResource> {
        self.state.lock().unwrap().resources.clone()
    }

    fn refresh(&mut self) -> anyhow::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.refreshes += 1;
        if state.fail_refresh {
            return Err(anyhow!("manifest is invalid"));
        }
        if let Some(next) = state.pending.take() {
            state.resources = next;
        }
        Ok(())
    }
}

impl RedrawRequester for RecordingHost {
    fn request_redraw(&self) {
        self.state.lock().unwrap().redraws += 1;
    }
}

impl Notifier for RecordingHost {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.state
            .lock()
            .unwrap()
            .notices
            .push((level, message.to_string()));
    }
}
