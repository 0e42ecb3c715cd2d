#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use linksync::config::{ConfigFile, ConfigSection, RawConfigFile, ResourceConfig};
use linksync::host::Reloadable;
use linksync::types::PollMode;
use linksync::watch::{WatchSet, WatchedEntry};

use crate::fakes::FakeResource;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                resource: BTreeMap::new(),
            },
        }
    }

    pub fn interval(mut self, secs: f64) -> Self {
        self.config.config.interval = secs;
        self
    }

    pub fn mode(mut self, mode: PollMode) -> Self {
        self.config.config.mode = mode;
        self
    }

    pub fn autostart(mut self, val: bool) -> Self {
        self.config.config.autostart = val;
        self
    }

    pub fn with_resource(mut self, name: &str, resource: ResourceConfig) -> Self {
        self.config.resource.insert(name.to_string(), resource);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `ResourceConfig`.
pub struct ResourceConfigBuilder {
    resource: ResourceConfig,
}

impl ResourceConfigBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            resource: ResourceConfig {
                path: path.to_string(),
                reload: None,
            },
        }
    }

    pub fn reload(mut self, cmd: &str) -> Self {
        self.resource.reload = Some(cmd.to_string());
        self
    }

    pub fn build(self) -> ResourceConfig {
        self.resource
    }
}

/// A `WatchedEntry` backed by a fresh `FakeResource` named after the path.
pub fn entry(path: &str, mtime: f64, size: u64) -> WatchedEntry {
    let resource: Arc<dyn Reloadable> = Arc::new(FakeResource::new(path));
    WatchedEntry {
        path: PathBuf::from(path),
        resource,
        resource_name: path.to_string(),
        mtime,
        size,
    }
}

/// Build a `WatchSet` from `(path, mtime, size)` triples.
pub fn watch_set(entries: &[(&str, f64, u64)]) -> WatchSet {
    entries
        .iter()
        .map(|&(path, mtime, size)| entry(path, mtime, size))
        .collect()
}
