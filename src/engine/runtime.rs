// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::fs::now_epoch_seconds;
use crate::host::{Host, NoticeLevel};

use super::scheduler::PollScheduler;
use super::timer::RecurringTimer;
use super::{ControlEvent, RuntimeOptions};

/// Drives a [`PollScheduler`] from a recurring timer and user actions.
///
/// This is the IO shell around the scheduler: it sleeps until the timer is
/// due, feeds ticks into the scheduler, and applies [`ControlEvent`]s as they
/// arrive. Everything runs on the task that awaits [`Runtime::run`], so the
/// scheduler and host only ever see one caller at a time.
pub struct Runtime<H: Host> {
    scheduler: PollScheduler,
    host: H,
    timer: RecurringTimer,
    control_rx: mpsc::Receiver<ControlEvent>,
    options: RuntimeOptions,
}

impl<H: Host> fmt::Debug for Runtime<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("scheduler", &self.scheduler)
            .field("timer", &self.timer)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Runtime<H> {
    pub fn new(
        scheduler: PollScheduler,
        host: H,
        control_rx: mpsc::Receiver<ControlEvent>,
        options: RuntimeOptions,
    ) -> Self {
        Self {
            scheduler,
            host,
            timer: RecurringTimer::new(),
            control_rx,
            options,
        }
    }

    /// Main event loop.
    ///
    /// - Registers the scheduler with the timer (first delay = interval).
    /// - Starts monitoring immediately if `autostart` is set.
    /// - Alternates between timer ticks and control events until
    ///   `ShutdownRequested` arrives or the control channel closes.
    pub async fn run(mut self) -> Result<()> {
        info!("linksync runtime started");

        if self.options.autostart {
            self.scheduler.start(&self.host, now_epoch_seconds());
        }

        let first_delay = self.scheduler.config().interval_delay();
        self.timer.register_recurring(first_delay, Instant::now());

        loop {
            let due = match self.timer.next_due() {
                Some(due) => due,
                None => {
                    warn!("timer not registered; re-registering");
                    let delay = self.scheduler.config().interval_delay();
                    self.timer.register_recurring(delay, Instant::now());
                    continue;
                }
            };

            tokio::select! {
                _ = tokio::time::sleep_until(due) => {
                    self.on_timer();
                }
                event = self.control_rx.recv() => {
                    let Some(event) = event else {
                        info!("control channel closed; exiting");
                        break;
                    };
                    debug!(?event, "runtime received control event");
                    if !self.handle_control(event) {
                        break;
                    }
                }
            }
        }

        self.timer.unregister();
        info!("runtime exiting");
        Ok(())
    }

    fn on_timer(&mut self) {
        let scheduler = &mut self.scheduler;
        let host = &self.host;
        let fired = self.timer.fire(Instant::now(), || {
            let outcome = scheduler.tick(host, now_epoch_seconds());
            if !outcome.report.is_empty() {
                debug!(check = ?outcome.check, report = ?outcome.report, "tick reloaded resources");
            }
            outcome.next_delay
        });
        if let Some(delay) = fired {
            debug!(?delay, "next tick scheduled");
        }
    }

    /// Apply a user action. Returns `false` when the loop should stop.
    fn handle_control(&mut self, event: ControlEvent) -> bool {
        let now = now_epoch_seconds();
        match event {
            ControlEvent::Start => {
                self.scheduler.start(&self.host, now);
                self.rearm();
            }
            ControlEvent::Stop => self.scheduler.stop(&self.host),
            ControlEvent::Toggle => {
                self.scheduler.toggle(&self.host, now);
                self.rearm();
            }
            ControlEvent::ForceCheck => {
                let report = self.scheduler.force_check(&self.host, now);
                if report.is_empty() {
                    self.host.notify(NoticeLevel::Info, "No changes detected.");
                }
            }
            ControlEvent::ReloadAll => {
                self.scheduler.reload_all(&self.host);
            }
            ControlEvent::SetInterval(secs) => {
                let stored = self.scheduler.set_interval(secs);
                self.rearm();
                self.host
                    .notify(NoticeLevel::Info, &format!("Check interval set to {stored}s."));
            }
            ControlEvent::SetMode(mode) => {
                self.scheduler.set_mode(mode);
                self.rearm();
                self.host
                    .notify(NoticeLevel::Info, &format!("Poll mode set to {mode}."));
            }
            ControlEvent::Status => self.report_status(),
            ControlEvent::CatalogChanged => {
                if let Err(err) = self.host.refresh() {
                    warn!(error = %err, "failed to refresh linked resources; keeping previous list");
                    self.host.notify(
                        NoticeLevel::Error,
                        &format!("Failed to refresh linked resources: {err:#}"),
                    );
                } else {
                    info!(
                        resources = self.host.linked_resources().len(),
                        "linked resource list refreshed"
                    );
                }
            }
            ControlEvent::ShutdownRequested => {
                info!("shutdown requested");
                return false;
            }
        }
        true
    }

    /// Re-register the timer so new settings apply without waiting out the
    /// delay returned by the previous tick.
    fn rearm(&mut self) {
        self.timer.unregister();
        let delay = self.scheduler.config().next_delay();
        self.timer.register_recurring(delay, Instant::now());
    }

    fn report_status(&self) {
        let cfg = self.scheduler.config();
        let watched = self.scheduler.watched();
        let state = if cfg.is_monitoring { "monitoring" } else { "stopped" };
        self.host.notify(
            NoticeLevel::Info,
            &format!(
                "{state}; interval {}s; mode {}; {} linked file(s)",
                cfg.interval,
                cfg.mode,
                watched.len()
            ),
        );
        if watched.is_empty() {
            self.host.notify(NoticeLevel::Info, "No linked files found.");
        }
        for entry in watched.sorted() {
            self.host.notify(
                NoticeLevel::Info,
                &format!("  {} ({})", entry.resource_name, entry.path.display()),
            );
        }
    }
}
