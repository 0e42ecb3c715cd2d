// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::engine::poll_config::{MAX_INTERVAL_SECS, MIN_INTERVAL_SECS};
use crate::errors::{LinkSyncError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::LinkSyncError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.resource))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_interval(cfg.config.interval)?;
    validate_resources(cfg)?;
    Ok(())
}

/// Reject intervals outside `MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS`.
///
/// Also used for `--interval` on the command line.
pub fn validate_interval(interval: f64) -> Result<()> {
    if !(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&interval) {
        return Err(LinkSyncError::ConfigError(format!(
            "[config].interval must be between {MIN_INTERVAL_SECS} and {MAX_INTERVAL_SECS} seconds (got {interval})"
        )));
    }
    Ok(())
}

fn validate_resources(cfg: &RawConfigFile) -> Result<()> {
    for (name, res) in cfg.resource.iter() {
        if name.trim().is_empty() {
            return Err(LinkSyncError::ConfigError(
                "resource names must not be empty".to_string(),
            ));
        }
        if let Some(cmd) = &res.reload {
            if cmd.trim().is_empty() {
                return Err(LinkSyncError::ConfigError(format!(
                    "resource '{}' has an empty `reload` command",
                    name
                )));
            }
        }
    }
    Ok(())
}
