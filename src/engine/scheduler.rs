// src/engine/scheduler.rs

//! Pure polling state machine.
//!
//! [`PollScheduler`] owns the [`PollConfig`] and the cached [`WatchSet`]. It
//! is driven by a recurring timer: every call to [`PollScheduler::tick`]
//! decides between a full check, a lightweight poll, or nothing, and returns
//! the delay until it wants to be called again.
//!
//! The scheduler is synchronous and takes `now` as an argument, so it can be
//! tested without a clock, a runtime, or a real filesystem. All mutation
//! happens through `&mut self`; a multi-threaded host must keep it behind a
//! single owner.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::engine::dispatch::{dispatch, dispatch_with, ReloadReport, SuccessNotice};
use crate::engine::poll_config::PollConfig;
use crate::fs::FileSystem;
use crate::host::{Host, NoticeLevel};
use crate::types::PollMode;
use crate::watch::{bust_cache, diff, rebuild, WatchSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// What a single tick ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// Monitoring is stopped; nothing was touched.
    Idle,
    /// Interval elapsed: snapshot, diff, reload, swap cache.
    Full,
    /// Aggressive mode between full checks: cache-bust cached paths, then
    /// snapshot, diff, reload, swap cache.
    Lightweight,
    /// Direct mode before the interval elapsed.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub check: CheckKind,
    pub report: ReloadReport,
    /// Seconds until the host should call `tick` again.
    pub next_delay: Duration,
}

#[derive(Debug)]
pub struct PollScheduler {
    config: PollConfig,
    cache: WatchSet,
    fs: Arc<dyn FileSystem>,
}

impl PollScheduler {
    pub fn new(config: PollConfig, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            config,
            cache: WatchSet::new(),
            fs,
        }
    }

    pub fn state(&self) -> SchedulerState {
        if self.config.is_monitoring {
            SchedulerState::Running
        } else {
            SchedulerState::Stopped
        }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Read-only view of the cached snapshot, for status displays.
    pub fn watched(&self) -> &WatchSet {
        &self.cache
    }

    /// Returns the interval actually stored after clamping.
    pub fn set_interval(&mut self, secs: f64) -> f64 {
        let stored = self.config.set_interval(secs);
        debug!(requested = secs, stored, "check interval updated");
        stored
    }

    pub fn set_mode(&mut self, mode: PollMode) {
        debug!(%mode, "poll mode updated");
        self.config.mode = mode;
    }

    /// STOPPED -> RUNNING: take a baseline snapshot and stamp the check time.
    ///
    /// Starting an already running scheduler does nothing.
    pub fn start<H: Host + ?Sized>(&mut self, host: &H, now: f64) {
        if self.config.is_monitoring {
            debug!("start requested while already monitoring");
            return;
        }
        self.cache = self.snapshot(host, self.config.mode.is_aggressive());
        self.config.is_monitoring = true;
        self.config.last_check_time = now;
        info!(
            watched = self.cache.len(),
            interval = self.config.interval,
            mode = %self.config.mode,
            "monitoring started"
        );
        host.notify(NoticeLevel::Info, "Linked file monitoring started.");
    }

    /// RUNNING -> STOPPED. Takes effect on the next tick.
    ///
    /// The cached snapshot is kept for display; the next `start` replaces it.
    pub fn stop<H: Host + ?Sized>(&mut self, host: &H) {
        if !self.config.is_monitoring {
            debug!("stop requested while not monitoring");
            return;
        }
        self.config.is_monitoring = false;
        self.config.last_check_time = 0.0;
        info!("monitoring stopped");
        host.notify(NoticeLevel::Info, "Linked file monitoring stopped.");
    }

    pub fn toggle<H: Host + ?Sized>(&mut self, host: &H, now: f64) {
        match self.state() {
            SchedulerState::Stopped => self.start(host, now),
            SchedulerState::Running => self.stop(host),
        }
    }

    /// Timer callback.
    pub fn tick<H: Host + ?Sized>(&mut self, host: &H, now: f64) -> TickOutcome {
        if !self.config.is_monitoring {
            return TickOutcome {
                check: CheckKind::Idle,
                report: ReloadReport::default(),
                next_delay: self.config.interval_delay(),
            };
        }

        let (check, report) = if self.config.interval_elapsed(now) {
            self.config.last_check_time = now;
            (CheckKind::Full, self.full_check(host))
        } else if self.config.mode.is_aggressive() {
            (CheckKind::Lightweight, self.lightweight_poll(host))
        } else {
            (CheckKind::Skipped, ReloadReport::default())
        };

        TickOutcome {
            check,
            report,
            next_delay: self.config.next_delay(),
        }
    }

    /// Run a full check right now, regardless of the interval or state.
    pub fn force_check<H: Host + ?Sized>(&mut self, host: &H, now: f64) -> ReloadReport {
        self.config.last_check_time = now;
        self.full_check(host)
    }

    /// Re-snapshot and reload every watched resource unconditionally.
    ///
    /// Each reloaded file gets its own notice. Does not touch the monitoring
    /// flag.
    pub fn reload_all<H: Host + ?Sized>(&mut self, host: &H) -> ReloadReport {
        let fresh = self.snapshot(host, self.config.mode.is_aggressive());
        let entries = fresh.sorted();
        info!(count = entries.len(), "reloading all linked resources");
        let report = dispatch_with(entries, host, SuccessNotice::PerFile);
        self.cache = fresh;
        report
    }

    fn full_check<H: Host + ?Sized>(&mut self, host: &H) -> ReloadReport {
        let fresh = self.snapshot(host, self.config.mode.is_aggressive());
        self.apply(host, fresh)
    }

    fn lightweight_poll<H: Host + ?Sized>(&mut self, host: &H) -> ReloadReport {
        for path in self.cache.paths() {
            bust_cache(self.fs.as_ref(), path);
        }
        // Cached paths were just busted; new ones have no baseline to diff
        // against, so there is no point busting them again.
        let fresh = self.snapshot(host, false);
        self.apply(host, fresh)
    }

    /// Diff against the cache, reload what changed, then swap the cache.
    fn apply<H: Host + ?Sized>(&mut self, host: &H, fresh: WatchSet) -> ReloadReport {
        let changed = diff(&self.cache, &fresh);
        let report = if changed.is_empty() {
            ReloadReport::default()
        } else {
            debug!(changed = changed.len(), "detected modified linked files");
            dispatch(&changed, host)
        };
        self.cache = fresh;
        report
    }

    fn snapshot<H: Host + ?Sized>(&self, host: &H, bust: bool) -> WatchSet {
        let resources = host.linked_resources();
        let root = host.project_root();
        rebuild(self.fs.as_ref(), &resources, root.as_deref(), bust)
    }
}
