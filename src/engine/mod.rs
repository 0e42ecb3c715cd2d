// src/engine/mod.rs

//! Scheduling and reloading.
//!
//! This module ties together:
//! - the polling configuration ([`PollConfig`])
//! - the reload dispatcher (per-resource failure isolation, redraw request)
//! - the pure polling state machine ([`PollScheduler`])
//! - the host timer facility ([`RecurringTimer`])
//! - the async runtime that reacts to:
//!   - timer ticks
//!   - user actions (start/stop, force check, reload all, settings)
//!   - manifest changes
//!   - shutdown signals
//!
//! The pure core lives in [`scheduler`]; the async/IO shell is implemented
//! in [`runtime`].

use std::str::FromStr;

use crate::types::PollMode;

/// Runtime options for the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Start monitoring as soon as the runtime starts.
    pub autostart: bool,
}

/// User actions and host notifications flowing into the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    Start,
    Stop,
    Toggle,
    /// Run a full check now, regardless of the interval.
    ForceCheck,
    /// Reload every linked resource unconditionally.
    ReloadAll,
    SetInterval(f64),
    SetMode(PollMode),
    /// Report state and the watched files through the host notifier.
    Status,
    /// The host's resource list may have changed; re-read it.
    CatalogChanged,
    /// Graceful shutdown requested (e.g. Ctrl-C or `quit`).
    ShutdownRequested,
}

impl FromStr for ControlEvent {
    type Err = String;

    /// Parse one line of interactive input, e.g. `interval 2.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next();

        if parts.next().is_some() {
            return Err(format!("too many arguments: {}", s.trim()));
        }

        let event = match (cmd.as_str(), arg) {
            ("start", None) => ControlEvent::Start,
            ("stop", None) => ControlEvent::Stop,
            ("toggle", None) => ControlEvent::Toggle,
            ("check", None) => ControlEvent::ForceCheck,
            ("reload-all", None) => ControlEvent::ReloadAll,
            ("status", None) => ControlEvent::Status,
            ("quit" | "exit", None) => ControlEvent::ShutdownRequested,
            ("interval", Some(v)) => {
                let secs: f64 = v
                    .parse()
                    .map_err(|_| format!("invalid interval: {v} (expected seconds)"))?;
                if !secs.is_finite() {
                    return Err(format!("invalid interval: {v} (expected seconds)"));
                }
                ControlEvent::SetInterval(secs)
            }
            ("mode", Some(v)) => ControlEvent::SetMode(v.parse()?),
            ("interval" | "mode", None) => return Err(format!("{cmd} needs a value")),
            (
                "start" | "stop" | "toggle" | "check" | "reload-all" | "status" | "quit" | "exit",
                Some(_),
            ) => {
                return Err(format!("{cmd} takes no arguments"));
            }
            ("", _) => return Err("empty command".to_string()),
            (other, _) => {
                return Err(format!(
                    "unknown command: {other} (expected start, stop, toggle, check, \
                     reload-all, interval <secs>, mode <direct|aggressive>, status, quit)"
                ));
            }
        };
        Ok(event)
    }
}

pub mod dispatch;
pub mod poll_config;
pub mod runtime;
pub mod scheduler;
pub mod timer;

pub use dispatch::{dispatch, dispatch_with, ReloadReport, SuccessNotice};
pub use poll_config::PollConfig;
pub use runtime::Runtime;
pub use scheduler::{CheckKind, PollScheduler, SchedulerState, TickOutcome};
pub use timer::RecurringTimer;
