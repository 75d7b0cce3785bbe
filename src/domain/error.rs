//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use std::process::Output;

use thiserror::Error;

// ── Polling errors ────────────────────────────────────────────────────────────

/// Terminal outcomes of a condition poll. A poll either fully succeeds or
/// fails with one of these; transient probe failures are retried silently
/// and never surface.
#[derive(Debug, Error)]
pub enum PollError {
    /// The timeout input was not a well-formed non-negative integer.
    /// Reported before the first probe attempt; never sleeps.
    #[error("invalid timeout '{value}': expected a non-negative whole number of seconds")]
    InvalidTimeout { value: String },

    /// The fatal test reported failure, so the condition can never hold.
    /// Reported without waiting out the remaining budget.
    #[error("aborting wait for '{probe}': {reason}")]
    FatalAbort { probe: String, reason: String },

    /// The time budget was exhausted before the condition held.
    /// `last_output` carries the final attempt for output-capturing polls.
    #[error("'{probe}' did not succeed within {waited_secs}s")]
    TimeoutExpired {
        probe: String,
        waited_secs: u64,
        last_output: Option<Output>,
    },
}

// ── Mail address errors ───────────────────────────────────────────────────────

/// Errors deriving mail-side paths from an account address.
#[derive(Debug, Error)]
pub enum MailAddressError {
    #[error("invalid account address '{0}': expected exactly one '@'")]
    MalformedAddress(String),

    #[error("invalid account address '{0}': empty local part or domain")]
    EmptyPart(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors validating harness configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid container name '{0}': must not be empty or contain whitespace")]
    InvalidContainerName(String),
}
