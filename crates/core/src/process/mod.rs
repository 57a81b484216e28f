//! Subprocess execution.
//!
//! Both the dependency resolver and the converter go through the
//! [`ProcessRunner`] trait to spawn external programs. Production code uses
//! [`TokioRunner`]; tests use [`crate::testing::MockRunner`] to record what
//! would have been executed.

mod tokio_runner;
mod traits;
mod types;

pub use tokio_runner::TokioRunner;
pub use traits::ProcessRunner;
pub use types::{CommandSpec, ProcessExit};
