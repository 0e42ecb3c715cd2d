// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// How aggressively the scheduler polls watched files.
///
/// - `Direct`: stat files once per configured interval. Cheap, and enough for
///   local disks (default).
/// - `Aggressive`: additionally run a lightweight poll every 200ms that
///   invalidates the OS metadata cache before stat-ing. Meant for network or
///   synced volumes whose metadata propagates with delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollMode {
    Direct,
    Aggressive,
}

impl PollMode {
    pub fn is_aggressive(self) -> bool {
        matches!(self, PollMode::Aggressive)
    }
}

impl Default for PollMode {
    fn default() -> Self {
        PollMode::Direct
    }
}

impl FromStr for PollMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(PollMode::Direct),
            "aggressive" => Ok(PollMode::Aggressive),
            other => Err(format!(
                "invalid poll mode: {other} (expected \"direct\" or \"aggressive\")"
            )),
        }
    }
}

impl fmt::Display for PollMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollMode::Direct => f.write_str("direct"),
            PollMode::Aggressive => f.write_str("aggressive"),
        }
    }
}
