// src/logging.rs

//! `tracing` subscriber setup for the `linksync` binary.
//!
//! `--log-level` wins; otherwise `LINKSYNC_LOG` is read as an `EnvFilter`
//! directive (e.g. `debug` or `linksync::notice=info,warn`), falling back to
//! `info`. Output goes to stderr, leaving stdout for `--dry-run`.

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::LogLevel;

/// Environment variable holding the default log filter.
pub const LOG_ENV: &str = "LINKSYNC_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(directive(level)),
        None => {
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
        }
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}

fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
