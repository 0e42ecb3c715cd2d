// tests/config_errors.rs

mod common;
use crate::common::builders::{ConfigFileBuilder, ResourceConfigBuilder};

use std::io::Write;

use tempfile::NamedTempFile;

use linksync::config::{load_and_validate, ConfigFile};
use linksync::errors::LinkSyncError;
use linksync::types::PollMode;

fn manifest(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn empty_manifest_uses_defaults() {
    let file = manifest("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.config.interval, 1.0);
    assert_eq!(cfg.config.mode, PollMode::Direct);
    assert!(cfg.config.autostart);
    assert!(cfg.resource.is_empty());
}

#[test]
fn full_manifest_round_trips_into_the_model() {
    let file = manifest(
        r#"
[config]
interval = 2.5
mode = "aggressive"
autostart = false

[resource.props]
path = "//assets/props.lib"

[resource.rig]
path = "rig.lib"
reload = "echo rig"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.config.interval, 2.5);
    assert_eq!(cfg.config.mode, PollMode::Aggressive);
    assert!(!cfg.config.autostart);
    assert_eq!(cfg.resource["props"].path, "//assets/props.lib");
    assert_eq!(cfg.resource["props"].reload, None);
    assert_eq!(cfg.resource["rig"].reload.as_deref(), Some("echo rig"));
}

#[test]
fn out_of_range_interval_returns_config_error() {
    let file = manifest("[config]\ninterval = 0.05\n");

    match load_and_validate(file.path()) {
        Err(LinkSyncError::ConfigError(msg)) => {
            assert!(msg.contains("interval"));
            assert!(msg.contains("0.05"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn unknown_mode_returns_toml_error() {
    let file = manifest("[config]\nmode = \"turbo\"\n");

    match load_and_validate(file.path()) {
        Err(LinkSyncError::TomlError(_)) => {}
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn missing_manifest_returns_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_and_validate(dir.path().join("nope.toml"));

    assert!(matches!(result, Err(LinkSyncError::IoError(_))));
}

#[test]
fn empty_reload_command_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_resource("props", ResourceConfigBuilder::new("props.lib").reload("  ").build())
        .raw();

    match ConfigFile::try_from(raw) {
        Err(LinkSyncError::ConfigError(msg)) => assert!(msg.contains("props")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn empty_resource_path_is_allowed() {
    let cfg = ConfigFileBuilder::new()
        .with_resource("unlinked", ResourceConfigBuilder::new("").build())
        .build();

    assert_eq!(cfg.resource["unlinked"].path, "");
}
