//! Domain layer — pure types, validation, and mail-side logic.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `crate::output`, `tokio`, `std::fs`, or `std::net`. All functions are
//! synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod mail;
pub mod poll;

#[allow(unused_imports)]
pub use config::{HarnessConfig, TestConfig, TestContext};
#[allow(unused_imports)]
pub use error::{ConfigError, MailAddressError, PollError};
#[allow(unused_imports)]
pub use mail::{MAIL_LOG_PATH, MAIL_VOLUME_ROOT, count_matches, mailbox_path, queue_is_empty};
#[allow(unused_imports)]
pub use poll::{PollSpec, ProbeStatus, Timeout};
