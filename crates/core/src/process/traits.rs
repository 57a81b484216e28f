//! Trait definitions for the process module.

use async_trait::async_trait;

use super::types::{CommandSpec, ProcessExit};

/// Spawns an external program and waits for it to finish.
///
/// The child's standard streams are forwarded to the caller's console.
/// Implementations must not return until the child has exited.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Runs the command to completion.
    ///
    /// A spawn failure is reported as an `io::Error`; in particular a missing
    /// program surfaces as `ErrorKind::NotFound`. A non-zero exit is not an
    /// error at this level.
    async fn run(&self, command: &CommandSpec) -> std::io::Result<ProcessExit>;
}
