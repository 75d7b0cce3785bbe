//! Domain types and validators for harness configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::poll::Timeout;

// ── Constants ────────────────────────────────────────────────────────────────

/// Container name used when a suite does not override it.
pub const DEFAULT_CONTAINER: &str = "mailship";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration loaded from `harness.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HarnessConfig {
    /// Test-run settings.
    #[serde(default)]
    pub test: TestConfig,
}

/// Test-run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    /// Name of the container under test.
    #[serde(default = "default_container")]
    pub container: String,
    /// Poll budget in seconds applied to waiters unless overridden per call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            container: default_container(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_container() -> String {
    DEFAULT_CONTAINER.to_string()
}

fn default_timeout_secs() -> u64 {
    Timeout::DEFAULT.as_secs()
}

// ── Test context ─────────────────────────────────────────────────────────────

/// Container identity and time budget threaded explicitly through every
/// waiter call. There is no ambient fallback: a context is always built by
/// the caller, usually from a [`HarnessConfig`].
#[derive(Debug, Clone)]
pub struct TestContext {
    pub container: String,
    pub timeout: Timeout,
}

impl TestContext {
    /// # Errors
    ///
    /// Returns an error if the container name is empty or contains
    /// whitespace.
    pub fn new(container: impl Into<String>, timeout: Timeout) -> Result<Self, ConfigError> {
        let container = container.into();
        if container.is_empty() || container.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidContainerName(container));
        }
        Ok(Self { container, timeout })
    }

    /// Build a context from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured container name is invalid.
    pub fn from_config(config: &HarnessConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.test.container.clone(),
            Timeout::from_secs(config.test.timeout_secs),
        )
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
