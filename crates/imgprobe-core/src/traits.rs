//! Collaborator traits for imgprobe

use crate::error::Result;

/// Captured, already-decoded output of one external command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Standard output of the command
    pub stdout: String,

    /// Standard error of the command
    pub stderr: String,
}

impl ExecOutput {
    /// Create output from stdout and stderr text
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for command-execution facilities
///
/// Implementations run `argv[0]` with the remaining arguments synchronously and
/// hand back the captured text. Retry and timeout policy belong to the
/// implementation.
pub trait Executor: Send + Sync {
    /// Run a command and capture its output
    fn execute(&self, argv: &[String]) -> Result<ExecOutput>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, argv: &[String]) -> Result<ExecOutput> {
        (**self).execute(argv)
    }
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&self, argv: &[String]) -> Result<ExecOutput> {
        (**self).execute(argv)
    }
}
