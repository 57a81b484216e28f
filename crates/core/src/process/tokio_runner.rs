//! Tokio-backed process runner.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use super::traits::ProcessRunner;
use super::types::{CommandSpec, ProcessExit};

/// Runs commands with `tokio::process`, inheriting stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRunner;

impl TokioRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioRunner {
    async fn run(&self, command: &CommandSpec) -> std::io::Result<ProcessExit> {
        debug!("Spawning: {}", command);

        // kill_on_drop ties the child's lifetime to ours
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .status()
            .await?;

        debug!("{} exited with {:?}", command.program.display(), status.code());
        Ok(ProcessExit::from(status))
    }
}
