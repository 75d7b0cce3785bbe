//! The condition poller: retry a probe until it holds, a fatal test fails,
//! or the time budget runs out.
//!
//! Imports only from `crate::domain`. Probes are caller-supplied closures;
//! all I/O they perform goes through injected port traits at the call site.

use std::future::Future;
use std::process::Output;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::error::PollError;
use crate::domain::poll::{PollSpec, ProbeStatus};

/// Fixed interval between probe attempts.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Optional precondition attached to a poll.
///
/// Checked only after the primary probe reports `Pending`. When `test`
/// returns `false` the poll aborts immediately instead of waiting out the
/// remaining budget.
pub struct FatalGuard<'a, G> {
    /// Names the precondition in abort messages.
    pub description: &'a str,
    /// Returns `false` when the precondition no longer holds.
    pub test: G,
}

/// Placeholder guard type for unguarded polls.
type Unguarded = fn() -> std::future::Ready<bool>;

/// Poll `probe` every second until it reports `Ready`.
///
/// Returns immediately on the first `Ready` with no trailing sleep. A
/// `Fatal` status from the probe aborts without retrying.
///
/// # Errors
///
/// Returns [`PollError::FatalAbort`] if the probe reports `Fatal`, or
/// [`PollError::TimeoutExpired`] once the budget is exhausted.
pub async fn poll_until_ready<P, PF>(spec: &PollSpec, probe: P) -> Result<(), PollError>
where
    P: FnMut() -> PF,
    PF: Future<Output = ProbeStatus>,
{
    run_loop(spec, probe, None::<FatalGuard<'_, Unguarded>>).await
}

/// Poll `probe` every second until it reports `Ready`, aborting early if
/// `guard` observes a failed precondition.
///
/// # Errors
///
/// Returns [`PollError::FatalAbort`] if the probe reports `Fatal` or the
/// guard fails, or [`PollError::TimeoutExpired`] once the budget is
/// exhausted.
pub async fn poll_until_ready_or_abort<P, PF, G, GF>(
    spec: &PollSpec,
    probe: P,
    guard: FatalGuard<'_, G>,
) -> Result<(), PollError>
where
    P: FnMut() -> PF,
    PF: Future<Output = ProbeStatus>,
    G: FnMut() -> GF,
    GF: Future<Output = bool>,
{
    run_loop(spec, probe, Some(guard)).await
}

/// Poll a command attempt every second until it exits successfully, and
/// hand the final attempt's output back to the caller.
///
/// Success is the attempt's exit status. An attempt that fails to execute
/// at all (spawn error) counts as a transient failure and is retried; the
/// last captured output is preserved for the timeout diagnostic.
///
/// # Errors
///
/// Returns [`PollError::TimeoutExpired`] carrying the last attempt's
/// output once the budget is exhausted.
pub async fn poll_capturing_output<A, AF>(
    spec: &PollSpec,
    mut attempt: A,
) -> Result<Output, PollError>
where
    A: FnMut() -> AF,
    AF: Future<Output = anyhow::Result<Output>>,
{
    let started = Instant::now();
    let mut last_output: Option<Output> = None;

    loop {
        match attempt().await {
            Ok(output) if output.status.success() => return Ok(output),
            Ok(output) => last_output = Some(output),
            Err(_) => {}
        }

        tokio::time::sleep(POLL_INTERVAL).await;
        if started.elapsed() >= spec.timeout.as_duration() {
            return Err(PollError::TimeoutExpired {
                probe: spec.description.clone(),
                waited_secs: started.elapsed().as_secs(),
                last_output,
            });
        }
    }
}

async fn run_loop<P, PF, G, GF>(
    spec: &PollSpec,
    mut probe: P,
    mut guard: Option<FatalGuard<'_, G>>,
) -> Result<(), PollError>
where
    P: FnMut() -> PF,
    PF: Future<Output = ProbeStatus>,
    G: FnMut() -> GF,
    GF: Future<Output = bool>,
{
    let started = Instant::now();

    loop {
        match probe().await {
            ProbeStatus::Ready => return Ok(()),
            ProbeStatus::Fatal { reason } => {
                return Err(PollError::FatalAbort {
                    probe: spec.description.clone(),
                    reason,
                });
            }
            ProbeStatus::Pending => {}
        }

        if let Some(g) = guard.as_mut() {
            if !(g.test)().await {
                return Err(PollError::FatalAbort {
                    probe: spec.description.clone(),
                    reason: format!("precondition '{}' no longer holds", g.description),
                });
            }
        }

        tokio::time::sleep(POLL_INTERVAL).await;
        if started.elapsed() >= spec.timeout.as_duration() {
            return Err(PollError::TimeoutExpired {
                probe: spec.description.clone(),
                waited_secs: started.elapsed().as_secs(),
                last_output: None,
            });
        }
    }
}
