//! Application services — the poller and the waiters built on it.

pub mod container;
pub mod poller;
pub mod waiters;
