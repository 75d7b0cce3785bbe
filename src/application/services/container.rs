//! Container state queries: parse runtime inspect output into typed state.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use anyhow::{Context, Result};

use crate::application::ports::ContainerInspector;

/// Container state as observed from the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    NotFound,
    Created,
    Running,
    Exited,
}

/// Get the named container's current state.
///
/// A failed inspect (non-zero exit) means the container does not exist.
///
/// # Errors
///
/// Returns an error if the runtime's inspect output cannot be parsed.
pub async fn state(inspector: &impl ContainerInspector, name: &str) -> Result<ContainerState> {
    let output = match inspector.inspect(name).await {
        Ok(o) if o.status.success() => o,
        _ => return Ok(ContainerState::NotFound),
    };
    let docs: serde_json::Value =
        serde_json::from_slice(&output.stdout).context("parsing container inspect output")?;
    let status = docs
        .get(0)
        .and_then(|d| d.get("State"))
        .and_then(|s| s.get("Status"))
        .and_then(|s| s.as_str())
        .unwrap_or("unknown");
    Ok(match status {
        "running" => ContainerState::Running,
        "created" => ContainerState::Created,
        _ => ContainerState::Exited,
    })
}

/// Check if the named container is currently running.
pub async fn is_running(inspector: &impl ContainerInspector, name: &str) -> bool {
    matches!(state(inspector, name).await, Ok(ContainerState::Running))
}

/// Resolve the primary IPv4 address of the named container.
///
/// Prefers the top-level `NetworkSettings.IPAddress`; falls back to the
/// first non-empty address across `NetworkSettings.Networks`.
///
/// # Errors
///
/// Returns an error if inspect fails, the output cannot be parsed, or no
/// address is assigned.
pub async fn ip_address(inspector: &impl ContainerInspector, name: &str) -> Result<String> {
    let output = inspector
        .inspect(name)
        .await
        .context("failed to query container state")?;
    anyhow::ensure!(output.status.success(), "container '{name}' not found");

    let docs: serde_json::Value =
        serde_json::from_slice(&output.stdout).context("invalid JSON from container inspect")?;
    let settings = docs.get(0).and_then(|d| d.get("NetworkSettings"));

    let direct = settings
        .and_then(|s| s.get("IPAddress"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty());
    if let Some(addr) = direct {
        return Ok(addr.to_string());
    }

    settings
        .and_then(|s| s.get("Networks"))
        .and_then(|n| n.as_object())
        .and_then(|networks| {
            networks
                .values()
                .filter_map(|net| net.get("IPAddress").and_then(|v| v.as_str()))
                .find(|addr| !addr.is_empty())
        })
        .map(String::from)
        .ok_or_else(|| anyhow::anyhow!("no IP address assigned to container '{name}'"))
}
