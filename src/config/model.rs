// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::engine::poll_config::DEFAULT_INTERVAL_SECS;
use crate::types::PollMode;

/// Manifest as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// interval = 1.0
/// mode = "direct"
/// autostart = true
///
/// [resource.props]
/// path = "//assets/props.lib"
/// reload = "echo reloading props"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Polling settings from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// All linked resources from `[resource.<name>]`.
    ///
    /// Keys are the resource display names.
    #[serde(default)]
    pub resource: BTreeMap<String, ResourceConfig>,
}

/// Validated manifest. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub resource: BTreeMap<String, ResourceConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        config: ConfigSection,
        resource: BTreeMap<String, ResourceConfig>,
    ) -> Self {
        Self { config, resource }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Seconds between full checks (0.1 to 60.0).
    #[serde(default = "default_interval")]
    pub interval: f64,

    /// `"direct"` (default) or `"aggressive"`.
    #[serde(default)]
    pub mode: PollMode,

    /// Begin monitoring as soon as the tool starts.
    #[serde(default = "default_autostart")]
    pub autostart: bool,
}

fn default_interval() -> f64 {
    DEFAULT_INTERVAL_SECS
}

fn default_autostart() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            mode: PollMode::default(),
            autostart: default_autostart(),
        }
    }
}

/// `[resource.<name>]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceConfig {
    /// Source file. `//` prefix means relative to the manifest directory.
    ///
    /// May be empty, in which case the resource is listed but never watched.
    #[serde(default)]
    pub path: String,

    /// Shell command run to reload the resource.
    ///
    /// If `None`, reloading re-reads the file into memory.
    #[serde(default)]
    pub reload: Option<String>,
}
