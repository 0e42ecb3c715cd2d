// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;
use crate::types::PollMode;

/// Command-line arguments for `linksync`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "linksync",
    version,
    about = "Reload externally-linked resource files when they change on disk.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the manifest (TOML) listing linked resources.
    ///
    /// Default: `Linksync.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Seconds between full checks (0.1 to 60.0). Overrides `[config].interval`.
    #[arg(long, value_name = "SECS")]
    pub interval: Option<f64>,

    /// Poll mode (direct, aggressive). Overrides `[config].mode`.
    #[arg(long, value_name = "MODE")]
    pub mode: Option<PollMode>,

    /// Reload every linked resource once and exit.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LINKSYNC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print resolved resources, but don't watch anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
