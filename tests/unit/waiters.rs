//! Unit tests for the specialized waiters.
//!
//! Waiters are exercised against scripted executor/inspector mocks on a
//! paused tokio clock, so multi-attempt scenarios complete instantly.

#![allow(clippy::expect_used)]

use std::time::Duration;

use mailship_harness::application::services::waiters::{
    run_until_success, wait_for_account_mailbox, wait_for_empty_mail_queue, wait_for_log_count,
    wait_for_service_running, wait_for_tcp_port,
};
use mailship_harness::domain::PollError;

use crate::helpers::{
    ContainerExited, ContainerRunning, ReporterStub, ScriptedExec, StopsRunningAfter, ctx,
    err_output, ok_output,
};

// ── wait_for_tcp_port ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn tcp_port_waiter_probes_with_nc_argv() {
    let exec = ScriptedExec::new(vec![err_output(1, b""), ok_output(b"")]);
    let result = wait_for_tcp_port(&exec, &ContainerRunning, &ctx(10), 25, &ReporterStub).await;

    assert!(result.is_ok());
    let calls = exec.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "mailship");
    assert_eq!(calls[0].1, vec!["nc", "-z", "127.0.0.1", "25"]);
}

#[tokio::test(start_paused = true)]
async fn tcp_port_waiter_aborts_when_container_is_not_running() {
    let exec = ScriptedExec::new(vec![err_output(1, b"")]);
    let started = tokio::time::Instant::now();
    let err = wait_for_tcp_port(&exec, &ContainerExited, &ctx(30), 143, &ReporterStub)
        .await
        .expect_err("expected abort");

    assert_eq!(started.elapsed(), Duration::ZERO, "no budget waited out");
    let msg = err.to_string();
    assert!(msg.contains("TCP port 143"), "probe named in: {msg}");
    assert!(msg.contains("container is running"), "guard named in: {msg}");
}

#[tokio::test(start_paused = true)]
async fn tcp_port_waiter_aborts_mid_poll_when_container_stops() {
    let exec = ScriptedExec::new(vec![err_output(1, b"")]);
    let inspector = StopsRunningAfter::new(2);

    let started = tokio::time::Instant::now();
    let err = wait_for_tcp_port(&exec, &inspector, &ctx(20), 25, &ReporterStub)
        .await
        .expect_err("expected abort");

    assert_eq!(started.elapsed(), Duration::from_secs(2));
    assert!(started.elapsed() < Duration::from_secs(20));
    assert!(err.to_string().contains("container is running"));
}

#[tokio::test(start_paused = true)]
async fn tcp_port_waiter_times_out_naming_the_probe() {
    let exec = ScriptedExec::new(vec![err_output(1, b"")]);
    let err = wait_for_tcp_port(&exec, &ContainerRunning, &ctx(2), 587, &ReporterStub)
        .await
        .expect_err("expected timeout");

    let msg = err.to_string();
    assert!(msg.contains("TCP port 587 open in 'mailship'"), "got: {msg}");
    assert!(msg.contains("2s"), "budget in: {msg}");
}

// ── wait_for_service_running ──────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn service_waiter_reads_supervisor_status() {
    let exec = ScriptedExec::new(vec![
        ok_output(b"smtpd    STARTING\n"),
        ok_output(b"smtpd    RUNNING   pid 123, uptime 0:00:02\n"),
    ]);
    let result =
        wait_for_service_running(&exec, &ContainerRunning, &ctx(10), "smtpd", &ReporterStub).await;

    assert!(result.is_ok());
    let calls = exec.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1, vec!["supervisorctl", "status", "smtpd"]);
}

#[tokio::test(start_paused = true)]
async fn service_waiter_aborts_when_container_is_not_running() {
    let exec = ScriptedExec::new(vec![ok_output(b"smtpd    FATAL\n")]);
    let err = wait_for_service_running(&exec, &ContainerExited, &ctx(30), "smtpd", &ReporterStub)
        .await
        .expect_err("expected abort");

    assert!(err.to_string().contains("service 'smtpd'"));
}

// ── wait_for_log_count ────────────────────────────────────────────────────────

const LOG_FOUR_MATCHES: &[u8] = b"postfix/smtpd: connect from a\n\
postfix/smtpd: connect from b\n\
postfix/qmgr: removed\n\
postfix/smtpd: connect from c\n\
postfix/smtpd: connect from d\n";

const LOG_FIVE_MATCHES: &[u8] = b"postfix/smtpd: connect from a\n\
postfix/smtpd: connect from b\n\
postfix/qmgr: removed\n\
postfix/smtpd: connect from c\n\
postfix/smtpd: connect from d\n\
postfix/smtpd: connect from e\n";

#[tokio::test(start_paused = true)]
async fn log_count_default_target_is_snapshot_plus_one() {
    let exec = ScriptedExec::new(vec![
        ok_output(LOG_FOUR_MATCHES), // snapshot: 4 matches
        ok_output(LOG_FOUR_MATCHES), // attempt 1: still 4
        ok_output(LOG_FIVE_MATCHES), // attempt 2: 5
    ]);

    let target = wait_for_log_count(
        &exec,
        &ctx(10),
        "smtpd: connect from",
        None,
        &ReporterStub,
    )
    .await
    .expect("waiter");

    assert_eq!(target, 5, "current count 4 resolves to target 5");
    let calls = exec.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].1, vec!["cat", "/var/log/mail/mail.log"]);
}

#[tokio::test(start_paused = true)]
async fn log_count_explicit_target_skips_the_snapshot() {
    let exec = ScriptedExec::new(vec![ok_output(LOG_FOUR_MATCHES)]);

    let target = wait_for_log_count(
        &exec,
        &ctx(10),
        "smtpd: connect from",
        Some(3),
        &ReporterStub,
    )
    .await
    .expect("waiter");

    assert_eq!(target, 3);
    assert_eq!(exec.call_count(), 1, "no snapshot read");
}

#[tokio::test(start_paused = true)]
async fn log_count_missing_log_defaults_to_first_occurrence() {
    let exec = ScriptedExec::new(vec![
        err_output(1, b"cat: /var/log/mail/mail.log: No such file or directory"),
        ok_output(b"postfix/smtpd: connect from a\n"),
    ]);

    let target = wait_for_log_count(
        &exec,
        &ctx(10),
        "smtpd: connect from",
        None,
        &ReporterStub,
    )
    .await
    .expect("waiter");

    assert_eq!(target, 1);
}

#[tokio::test(start_paused = true)]
async fn log_count_invalid_pattern_fails_without_polling() {
    let exec = ScriptedExec::new(vec![ok_output(LOG_FOUR_MATCHES)]);
    let started = tokio::time::Instant::now();

    let err = wait_for_log_count(&exec, &ctx(10), "unclosed(", Some(1), &ReporterStub)
        .await
        .expect_err("expected Err");

    assert_eq!(started.elapsed(), Duration::ZERO);
    assert!(
        err.to_string().contains("invalid log pattern"),
        "got: {err}"
    );
}

// ── wait_for_account_mailbox ──────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn mailbox_waiter_probes_the_derived_path() {
    let exec = ScriptedExec::new(vec![err_output(1, b""), ok_output(b"")]);
    let result =
        wait_for_account_mailbox(&exec, &ctx(10), "user@example.test", &ReporterStub).await;

    assert!(result.is_ok());
    let calls = exec.calls();
    assert_eq!(calls[0].1, vec!["test", "-d", "/var/mail/example.test/user"]);
}

#[tokio::test(start_paused = true)]
async fn mailbox_waiter_rejects_malformed_address_without_probing() {
    let exec = ScriptedExec::new(vec![ok_output(b"")]);
    let err = wait_for_account_mailbox(&exec, &ctx(10), "not-an-address", &ReporterStub)
        .await
        .expect_err("expected Err");

    assert_eq!(exec.call_count(), 0);
    assert!(err.to_string().contains("not-an-address"), "got: {err}");
}

// ── wait_for_empty_mail_queue ─────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn queue_waiter_polls_until_the_sentinel_appears() {
    let exec = ScriptedExec::new(vec![
        ok_output(b"-Queue ID- --Size-- ----Arrival Time---- -Sender/Recipient-------\nAB12 1024 Mon Aug  3 10:00:00 sender@example.test\n"),
        ok_output(b"Mail queue is empty\n"),
    ]);

    let started = tokio::time::Instant::now();
    let result = wait_for_empty_mail_queue(&exec, &ctx(10), &ReporterStub).await;

    assert!(result.is_ok());
    assert_eq!(started.elapsed(), Duration::from_secs(1));
    assert_eq!(exec.calls()[0].1, vec!["mailq"]);
}

// ── run_until_success ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn run_until_success_returns_the_final_output() {
    let exec = ScriptedExec::new(vec![
        err_output(1, b"not ready"),
        ok_output(b"mailship config OK\n"),
    ]);

    let output = run_until_success(&exec, &ctx(10), &["postfix", "check"])
        .await
        .expect("success");

    assert_eq!(output.stdout, b"mailship config OK\n");
    assert_eq!(exec.calls()[0].1, vec!["postfix", "check"]);
}

#[tokio::test(start_paused = true)]
async fn run_until_success_timeout_embeds_the_last_attempt() {
    let exec = ScriptedExec::new(vec![err_output(69, b"service unavailable")]);

    let err = run_until_success(&exec, &ctx(2), &["postfix", "check"])
        .await
        .expect_err("expected timeout");

    let poll_err = err
        .downcast_ref::<PollError>()
        .expect("PollError inside anyhow chain");
    match poll_err {
        PollError::TimeoutExpired { last_output, .. } => {
            let last = last_output.as_ref().expect("last attempt captured");
            assert_eq!(last.stderr, b"service unavailable");
        }
        other => panic!("expected TimeoutExpired, got: {other}"),
    }
}
