//! Polling domain types: timeout budgets, probe results, and poll specs.
//!
//! Pure functions only — no I/O, no async, no clocks. The poller in
//! `application::services::poller` consumes these.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::PollError;

// ── Timeout ───────────────────────────────────────────────────────────────────

/// A poll time budget in whole seconds.
///
/// Construct from an integer with [`Timeout::from_secs`], or parse from a
/// string (e.g. a suite-level setting) with `str::parse`. Parsing rejects
/// anything that is not a well-formed non-negative integer, so a malformed
/// budget fails before any probe runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timeout(u64);

impl Timeout {
    /// Default budget applied when a suite does not override it.
    pub const DEFAULT: Timeout = Timeout(120);

    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl FromStr for Timeout {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(PollError::InvalidTimeout {
                value: s.to_string(),
            });
        }
        trimmed
            .parse::<u64>()
            .map(Timeout)
            .map_err(|_| PollError::InvalidTimeout {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

// ── Probe results ─────────────────────────────────────────────────────────────

/// Tri-state result of one probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The condition holds; polling ends successfully.
    Ready,
    /// The condition does not hold yet; retried silently.
    Pending,
    /// The condition can never hold; polling aborts immediately.
    Fatal { reason: String },
}

// ── Poll spec ─────────────────────────────────────────────────────────────────

/// Per-call description and budget, threaded explicitly to the poller.
///
/// The description names the probe in every terminal outcome, so error
/// messages identify which condition was being waited on.
#[derive(Debug, Clone)]
pub struct PollSpec {
    pub description: String,
    pub timeout: Timeout,
}

impl PollSpec {
    #[must_use]
    pub fn new(description: impl Into<String>, timeout: Timeout) -> Self {
        Self {
            description: description.into(),
            timeout,
        }
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
