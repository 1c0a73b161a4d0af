//! Process-backed command execution

use crate::error::{Result, ToolError};
use imgprobe_core::{ExecOutput, Executor};
use std::process::Command;

/// Runs commands as child processes and captures their output
///
/// Output is decoded lossily as UTF-8. The child inherits the current
/// environment; locale pinning is done through the command line.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    check_status: bool,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self { check_status: true }
    }
}

impl ProcessExecutor {
    /// Create an executor
    ///
    /// With `check_status` set, a non-zero exit becomes [`ToolError::ExitStatus`].
    pub fn new(check_status: bool) -> Self {
        Self { check_status }
    }

    /// Run `argv` and capture stdout and stderr
    pub fn run(&self, argv: &[String]) -> Result<ExecOutput> {
        let (program, args) = argv.split_first().ok_or(ToolError::EmptyCommand)?;

        tracing::debug!("Running: {}", argv.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| ToolError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::warn!("{} exited with {}: {}", program, output.status, stderr.trim());
            if self.check_status {
                return Err(ToolError::exit_status(
                    program.as_str(),
                    output.status.code(),
                    stderr.trim(),
                ));
            }
        }

        Ok(ExecOutput { stdout, stderr })
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, argv: &[String]) -> imgprobe_core::Result<ExecOutput> {
        self.run(argv).map_err(Into::into)
    }
}
