//! Mailship harness library — exposes the poller, waiters, and container
//! ports used by the integration-test suites.

#![cfg_attr(test, allow(clippy::expect_used))]

pub mod application;
pub mod domain;
pub mod infra;
pub mod output;
