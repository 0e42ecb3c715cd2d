// src/engine/timer.rs

//! Host timer facility: a single recurring callback slot.
//!
//! Mirrors the "register a function that returns its next delay" model of
//! interactive hosts. Registration and unregistration are idempotent.

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Default)]
pub struct RecurringTimer {
    next_due: Option<Instant>,
}

impl RecurringTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the callback to first fire `first_delay` after `now`.
    ///
    /// Returns `false` (and keeps the existing schedule) if already registered.
    pub fn register_recurring(&mut self, first_delay: Duration, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + first_delay);
        debug!(?first_delay, "timer registered");
        true
    }

    /// Returns `true` if a registration was removed.
    pub fn unregister(&mut self) -> bool {
        let was = self.next_due.take().is_some();
        if was {
            debug!("timer unregistered");
        }
        was
    }

    pub fn is_registered(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    /// Fire the callback if it is registered and due, and reschedule it using
    /// the delay it returns.
    ///
    /// Returns that delay, or `None` if nothing fired.
    pub fn fire<F>(&mut self, now: Instant, callback: F) -> Option<Duration>
    where
        F: FnOnce() -> Duration,
    {
        if !self.is_due(now) {
            return None;
        }
        let delay = callback();
        self.next_due = Some(now + delay);
        Some(delay)
    }
}
