//! Docker CLI abstraction — enables test doubles for all `docker` commands.
//!
//! Implements the container ports by shelling out to the `docker` binary
//! through an injected [`CommandRunner`]. Argument vectors are built as
//! typed lists and passed through unchanged; no shell ever interprets them.

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ContainerExecutor, ContainerInspector};

/// Production implementation — shells out to the `docker` binary.
pub struct DockerCli<R> {
    runner: R,
}

impl<R: CommandRunner> DockerCli<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> ContainerExecutor for DockerCli<R> {
    async fn exec(&self, container: &str, argv: &[&str]) -> Result<Output> {
        let mut args: Vec<&str> = vec!["exec", container];
        args.extend_from_slice(argv);
        self.runner
            .run("docker", &args)
            .await
            .context("failed to run docker exec")
    }
}

impl<R: CommandRunner> ContainerInspector for DockerCli<R> {
    async fn inspect(&self, container: &str) -> Result<Output> {
        self.runner
            .run("docker", &["inspect", container])
            .await
            .context("failed to run docker inspect")
    }
}
