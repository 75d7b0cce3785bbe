//! Specialized waiters: thin probe + budget compositions over the poller.
//!
//! Each waiter builds a [`PollSpec`] from the caller's [`TestContext`] and
//! probes the container through injected port traits. Probes run inside the
//! container; nothing here shells out directly.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{ContainerExecutor, ContainerInspector, ProgressReporter};
use crate::application::services::container;
use crate::application::services::poller::{self, FatalGuard};
use crate::domain::TestContext;
use crate::domain::mail::{MAIL_LOG_PATH, count_matches, mailbox_path, queue_is_empty};
use crate::domain::poll::{PollSpec, ProbeStatus};

/// Wait until a TCP port inside the container accepts connections.
///
/// Aborts early if the container stops running.
///
/// # Errors
///
/// Returns an error on fatal abort or when the budget expires.
pub async fn wait_for_tcp_port(
    exec: &impl ContainerExecutor,
    inspector: &impl ContainerInspector,
    ctx: &TestContext,
    port: u16,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step(&format!("waiting for port {port} to accept connections..."));
    let spec = PollSpec::new(
        format!("TCP port {port} open in '{}'", ctx.container),
        ctx.timeout,
    );
    let container_name = ctx.container.as_str();

    let probe = move || async move {
        let port_arg = port.to_string();
        match exec
            .exec(container_name, &["nc", "-z", "127.0.0.1", port_arg.as_str()])
            .await
        {
            Ok(output) if output.status.success() => ProbeStatus::Ready,
            _ => ProbeStatus::Pending,
        }
    };
    let guard = FatalGuard {
        description: "container is running",
        test: move || container::is_running(inspector, container_name),
    };

    poller::poll_until_ready_or_abort(&spec, probe, guard).await?;
    reporter.success(&format!("port {port} is accepting connections"));
    Ok(())
}

/// Wait until the supervisor reports a service as `RUNNING`.
///
/// Aborts early if the container stops running.
///
/// # Errors
///
/// Returns an error on fatal abort or when the budget expires.
pub async fn wait_for_service_running(
    exec: &impl ContainerExecutor,
    inspector: &impl ContainerInspector,
    ctx: &TestContext,
    service: &str,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step(&format!("waiting for service '{service}' to start..."));
    let spec = PollSpec::new(
        format!("service '{service}' running in '{}'", ctx.container),
        ctx.timeout,
    );
    let container_name = ctx.container.as_str();

    let probe = move || async move {
        match exec
            .exec(container_name, &["supervisorctl", "status", service])
            .await
        {
            Ok(output) if String::from_utf8_lossy(&output.stdout).contains("RUNNING") => {
                ProbeStatus::Ready
            }
            _ => ProbeStatus::Pending,
        }
    };
    let guard = FatalGuard {
        description: "container is running",
        test: move || container::is_running(inspector, container_name),
    };

    poller::poll_until_ready_or_abort(&spec, probe, guard).await?;
    reporter.success(&format!("service '{service}' is running"));
    Ok(())
}

/// Wait until the mail log holds at least `expected` lines matching
/// `pattern`.
///
/// When `expected` is `None`, the target is snapshotted once before polling
/// as the current match count plus one ("at least one new occurrence") and
/// compared as an absolute floor on every attempt thereafter. Returns the
/// resolved target count.
///
/// # Errors
///
/// Returns an error if the pattern is not a valid regular expression or
/// when the budget expires.
pub async fn wait_for_log_count(
    exec: &impl ContainerExecutor,
    ctx: &TestContext,
    pattern: &str,
    expected: Option<usize>,
    reporter: &impl ProgressReporter,
) -> Result<usize> {
    let target = match expected {
        Some(count) => count,
        None => current_log_count(exec, ctx, pattern).await? + 1,
    };
    reporter.step(&format!(
        "waiting for {target} log lines matching '{pattern}'..."
    ));
    let spec = PollSpec::new(
        format!("{target} or more lines matching '{pattern}' in {MAIL_LOG_PATH}"),
        ctx.timeout,
    );
    let container_name = ctx.container.as_str();

    let probe = move || async move {
        match exec.exec(container_name, &["cat", MAIL_LOG_PATH]).await {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout);
                match count_matches(&text, pattern) {
                    Ok(count) if count >= target => ProbeStatus::Ready,
                    Ok(_) => ProbeStatus::Pending,
                    Err(err) => ProbeStatus::Fatal {
                        reason: format!("invalid log pattern '{pattern}': {err}"),
                    },
                }
            }
            _ => ProbeStatus::Pending,
        }
    };

    poller::poll_until_ready(&spec, probe).await?;
    reporter.success(&format!("found {target} matching log lines"));
    Ok(target)
}

/// Wait until the mailbox directory for an account exists.
///
/// The path is derived by splitting the address on `'@'`:
/// `user@example.test` → `/var/mail/example.test/user`.
///
/// # Errors
///
/// Returns an error if the address is malformed or when the budget
/// expires.
pub async fn wait_for_account_mailbox(
    exec: &impl ContainerExecutor,
    ctx: &TestContext,
    address: &str,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    let path = mailbox_path(address)?;
    reporter.step(&format!("waiting for mailbox of '{address}'..."));
    let spec = PollSpec::new(
        format!("mailbox directory {path} for '{address}'"),
        ctx.timeout,
    );
    let container_name = ctx.container.as_str();
    let path_arg = path.as_str();

    let probe = move || async move {
        match exec.exec(container_name, &["test", "-d", path_arg]).await {
            Ok(output) if output.status.success() => ProbeStatus::Ready,
            _ => ProbeStatus::Pending,
        }
    };

    poller::poll_until_ready(&spec, probe).await?;
    reporter.success(&format!("mailbox for '{address}' exists"));
    Ok(())
}

/// Wait until the mail queue reports itself drained.
///
/// # Errors
///
/// Returns an error when the budget expires.
pub async fn wait_for_empty_mail_queue(
    exec: &impl ContainerExecutor,
    ctx: &TestContext,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("waiting for the mail queue to drain...");
    let spec = PollSpec::new(
        format!("empty mail queue in '{}'", ctx.container),
        ctx.timeout,
    );
    let container_name = ctx.container.as_str();

    let probe = move || async move {
        match exec.exec(container_name, &["mailq"]).await {
            Ok(output)
                if output.status.success()
                    && queue_is_empty(&String::from_utf8_lossy(&output.stdout)) =>
            {
                ProbeStatus::Ready
            }
            _ => ProbeStatus::Pending,
        }
    };

    poller::poll_until_ready(&spec, probe).await?;
    reporter.success("mail queue is empty");
    Ok(())
}

/// Re-run a command inside the container until it exits successfully,
/// returning the final attempt's output for assertion-style checks.
///
/// # Errors
///
/// Returns an error carrying the last attempt's output when the budget
/// expires.
pub async fn run_until_success(
    exec: &impl ContainerExecutor,
    ctx: &TestContext,
    argv: &[&str],
) -> Result<Output> {
    let spec = PollSpec::new(
        format!("command `{}` succeeds in '{}'", argv.join(" "), ctx.container),
        ctx.timeout,
    );
    let container_name = ctx.container.as_str();

    let attempt = move || exec.exec(container_name, argv);
    let output = poller::poll_capturing_output(&spec, attempt).await?;
    Ok(output)
}

/// Snapshot the current match count without polling.
async fn current_log_count(
    exec: &impl ContainerExecutor,
    ctx: &TestContext,
    pattern: &str,
) -> Result<usize> {
    let output = exec
        .exec(ctx.container.as_str(), &["cat", MAIL_LOG_PATH])
        .await
        .context("reading mail log for count snapshot")?;
    if !output.status.success() {
        // Log not created yet: any first occurrence satisfies the default.
        return Ok(0);
    }
    let text = String::from_utf8_lossy(&output.stdout);
    count_matches(&text, pattern)
}
