//! Mock process runner for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::process::{CommandSpec, ProcessExit, ProcessRunner};

/// Scripted result for one `run` call.
#[derive(Debug, Clone, Copy)]
enum Outcome {
    Exit(ProcessExit),
    SpawnError(ErrorKind),
}

/// Mock implementation of the ProcessRunner trait.
///
/// Records every command it is asked to run and answers with scripted
/// outcomes. Once the script is exhausted every call exits with code 0.
///
/// Clones share state, so a test can hand one clone to the code under test
/// and keep another for assertions.
///
/// # Example
///
/// ```rust,ignore
/// use mov2mp4_core::testing::MockRunner;
///
/// let runner = MockRunner::new();
/// runner.push_exit_code(1).await;
///
/// let converter = FfmpegConverter::new(&config, runner.clone());
/// let err = converter.convert(request).await.unwrap_err();
///
/// assert_eq!(runner.recorded_commands().await.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    /// Commands received, in call order.
    commands: Arc<RwLock<Vec<CommandSpec>>>,
    /// Outcomes to return, consumed front to back.
    outcomes: Arc<RwLock<VecDeque<Outcome>>>,
}

impl MockRunner {
    /// Create a new mock runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an exit code for the next unscripted call.
    pub async fn push_exit_code(&self, code: i32) {
        self.outcomes
            .write()
            .await
            .push_back(Outcome::Exit(ProcessExit::with_code(code)));
    }

    /// Queue a signal termination for the next unscripted call.
    pub async fn push_signalled(&self) {
        self.outcomes
            .write()
            .await
            .push_back(Outcome::Exit(ProcessExit::signalled()));
    }

    /// Queue a spawn failure for the next unscripted call.
    pub async fn push_spawn_error(&self, kind: ErrorKind) {
        self.outcomes
            .write()
            .await
            .push_back(Outcome::SpawnError(kind));
    }

    /// All commands run so far.
    pub async fn recorded_commands(&self) -> Vec<CommandSpec> {
        self.commands.read().await.clone()
    }

    /// Number of commands run so far.
    pub async fn call_count(&self) -> usize {
        self.commands.read().await.len()
    }
}

#[async_trait]
impl ProcessRunner for MockRunner {
    async fn run(&self, command: &CommandSpec) -> std::io::Result<ProcessExit> {
        self.commands.write().await.push(command.clone());

        match self.outcomes.write().await.pop_front() {
            Some(Outcome::Exit(exit)) => Ok(exit),
            Some(Outcome::SpawnError(kind)) => Err(std::io::Error::new(
                kind,
                format!("mock spawn failure for {}", command.program.display()),
            )),
            None => Ok(ProcessExit::with_code(0)),
        }
    }
}
