//! Presentation-layer implementations of `ProgressReporter`.
//!
//! `TerminalReporter` wraps `&OutputContext` so waiters can emit progress
//! events without depending on any presentation type directly.
//! `SpinnerReporter` keeps a live spinner running across the long waits.

use std::sync::Mutex;

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;
use crate::output::progress;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ⚠ {message}"` (suppressed when `ctx.quiet`)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".cyan());
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".green());
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "⚠".yellow());
        }
    }
}

/// Spinner-backed reporter for interactive runs.
///
/// `step()` starts a spinner (or retargets the active one), `success()`
/// finishes it with a checkmark. Falls back to plain lines when no spinner
/// is active.
#[derive(Default)]
pub struct SpinnerReporter {
    active: Mutex<Option<indicatif::ProgressBar>>,
}

impl SpinnerReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step(&self, message: &str) {
        if let Ok(mut active) = self.active.lock() {
            match active.as_ref() {
                Some(pb) => pb.set_message(message.to_string()),
                None => *active = Some(progress::spinner(message)),
            }
        }
    }

    fn success(&self, message: &str) {
        if let Ok(mut active) = self.active.lock() {
            match active.take() {
                Some(pb) => progress::finish_ok(&pb, message),
                None => println!("  {} {message}", "✓".green()),
            }
        }
    }

    fn warn(&self, message: &str) {
        if let Ok(active) = self.active.lock() {
            match active.as_ref() {
                Some(pb) => pb.println(format!("  {} {message}", "⚠".yellow())),
                None => println!("  {} {message}", "⚠".yellow()),
            }
        }
    }
}
