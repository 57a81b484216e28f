//! Types for the process module.

use std::fmt;
use std::path::PathBuf;
use std::process::ExitStatus;

/// A program invocation: executable plus its argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute, resolved through the search path if bare.
    pub program: PathBuf,
    /// Arguments passed to the program, in order.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Creates a command with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Whether `flag` is immediately followed by `value` in the argument list.
    pub fn has_pair(&self, flag: &str, value: &str) -> bool {
        self.args
            .windows(2)
            .any(|pair| pair[0] == flag && pair[1] == value)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// How a child process finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessExit {
    /// A process that exited with the given code.
    pub fn with_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// A process that was killed by a signal.
    pub fn signalled() -> Self {
        Self { code: None }
    }

    /// Whether the process exited with code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ProcessExit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_spec_builder() {
        let cmd = CommandSpec::new("brew").arg("install").args(["ffmpeg"]);
        assert_eq!(cmd.program, PathBuf::from("brew"));
        assert_eq!(cmd.args, vec!["install", "ffmpeg"]);
        assert_eq!(cmd.to_string(), "brew install ffmpeg");
    }

    #[test]
    fn test_command_spec_display_quotes_whitespace() {
        let cmd = CommandSpec::new("ffmpeg").args(["-i", "my clip.mov"]);
        assert_eq!(cmd.to_string(), "ffmpeg -i \"my clip.mov\"");
    }

    #[test]
    fn test_has_pair() {
        let cmd = CommandSpec::new("ffmpeg").args(["-crf", "18", "-b:a", "192k"]);
        assert!(cmd.has_pair("-crf", "18"));
        assert!(cmd.has_pair("-b:a", "192k"));
        assert!(!cmd.has_pair("-crf", "192k"));
    }

    #[test]
    fn test_process_exit() {
        assert!(ProcessExit::with_code(0).success());
        assert!(!ProcessExit::with_code(1).success());
        assert!(!ProcessExit::signalled().success());
    }
}
