//! Mail-side pure logic: mailbox paths, log scraping, queue state.
//!
//! Centralizes the in-container paths and sentinels the waiters probe for,
//! so they are not scattered across call sites.

use anyhow::Result;
use regex::Regex;

use crate::domain::error::MailAddressError;

// ── In-container constants ────────────────────────────────────────────────────

/// Mail log inside the container.
pub const MAIL_LOG_PATH: &str = "/var/log/mail/mail.log";

/// Root of per-domain mailbox storage inside the container.
pub const MAIL_VOLUME_ROOT: &str = "/var/mail";

/// Substring `mailq` prints when the Postfix queue has drained.
pub const QUEUE_EMPTY_SENTINEL: &str = "Mail queue is empty";

// ── Pure functions ────────────────────────────────────────────────────────────

/// Derive the mailbox directory for an account address.
///
/// `user@example.test` maps to `/var/mail/example.test/user`.
///
/// # Errors
///
/// Returns an error if the address does not contain exactly one `'@'`, or
/// if either half is empty.
pub fn mailbox_path(address: &str) -> Result<String, MailAddressError> {
    let mut parts = address.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(MailAddressError::MalformedAddress(address.to_string()));
    };
    if local.is_empty() || domain.is_empty() {
        return Err(MailAddressError::EmptyPart(address.to_string()));
    }
    Ok(format!("{MAIL_VOLUME_ROOT}/{domain}/{local}"))
}

/// Count log lines matching `pattern`.
///
/// # Errors
///
/// Returns an error if the pattern is not a valid regular expression.
pub fn count_matches(log_text: &str, pattern: &str) -> Result<usize> {
    let re = Regex::new(pattern)?;
    Ok(log_text.lines().filter(|line| re.is_match(line)).count())
}

/// Whether `mailq` output reports a drained queue.
#[must_use]
pub fn queue_is_empty(mailq_output: &str) -> bool {
    mailq_output.contains(QUEUE_EMPTY_SENTINEL)
}

// ── Unit tests ────────────────────────────────────────────────────────────────
