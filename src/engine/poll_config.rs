// src/engine/poll_config.rs

use std::time::Duration;

use crate::types::PollMode;

pub const MIN_INTERVAL_SECS: f64 = 0.1;
pub const MAX_INTERVAL_SECS: f64 = 60.0;
pub const DEFAULT_INTERVAL_SECS: f64 = 1.0;

/// Delay between ticks in aggressive mode, whatever the configured interval.
pub const AGGRESSIVE_POLL_SECS: f64 = 0.2;

/// User-facing polling settings plus the monitoring flag.
///
/// `interval` and `mode` survive stop/start cycles; `is_monitoring` and
/// `last_check_time` are reset by them.
#[derive(Debug, Clone, PartialEq)]
pub struct PollConfig {
    /// Seconds between full checks, within
    /// `MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS`.
    pub interval: f64,
    pub mode: PollMode,
    pub is_monitoring: bool,
    /// Epoch seconds of the last full check.
    pub last_check_time: f64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_SECS, PollMode::default())
    }
}

impl PollConfig {
    pub fn new(interval: f64, mode: PollMode) -> Self {
        Self {
            interval: clamp_interval(interval),
            mode,
            is_monitoring: false,
            last_check_time: 0.0,
        }
    }

    /// Set the interval, clamping it into the allowed range.
    ///
    /// Returns the value actually stored.
    pub fn set_interval(&mut self, secs: f64) -> f64 {
        self.interval = clamp_interval(secs);
        self.interval
    }

    /// True once at least `interval` seconds have passed since the last full
    /// check.
    pub fn interval_elapsed(&self, now: f64) -> bool {
        now - self.last_check_time >= self.interval
    }

    /// Delay the host timer should wait before the next tick.
    pub fn next_delay(&self) -> Duration {
        match self.mode {
            PollMode::Aggressive => Duration::from_secs_f64(AGGRESSIVE_POLL_SECS),
            PollMode::Direct => self.interval_delay(),
        }
    }

    pub fn interval_delay(&self) -> Duration {
        Duration::from_secs_f64(self.interval)
    }
}

/// Clamp into `MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS`. NaN maps to the default.
pub fn clamp_interval(secs: f64) -> f64 {
    if secs.is_nan() {
        return DEFAULT_INTERVAL_SECS;
    }
    secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS)
}
