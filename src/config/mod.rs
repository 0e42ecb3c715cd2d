// src/config/mod.rs

//! Manifest loading and validation for linksync.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a manifest from disk (`loader.rs`).
//! - Validate basic invariants like the interval range (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, manifest_root_dir};
pub use model::{ConfigFile, ConfigSection, RawConfigFile, ResourceConfig};
pub use validate::validate_interval;
