//! Error types for qemu-img invocation

use thiserror::Error;

/// Result type for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors that can occur while running qemu-img
#[derive(Error, Debug)]
pub enum ToolError {
    /// Command line was empty
    #[error("Empty command line")]
    EmptyCommand,

    /// Program could not be started
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Program ran but reported failure
    #[error("{program} failed with {status}: {stderr}")]
    ExitStatus {
        program: String,
        code: Option<i32>,
        status: String,
        stderr: String,
    },

    /// Path cannot be passed on the command line
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Parse or collaborator error
    #[error(transparent)]
    Core(#[from] imgprobe_core::Error),
}

impl ToolError {
    /// Create an exit status error from the process exit code
    pub fn exit_status(program: impl Into<String>, code: Option<i32>, stderr: impl Into<String>) -> Self {
        let status = match code {
            Some(c) => format!("exit code {}", c),
            None => "no exit code".to_string(),
        };
        ToolError::ExitStatus {
            program: program.into(),
            code,
            status,
            stderr: stderr.into(),
        }
    }
}

impl From<ToolError> for imgprobe_core::Error {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::Spawn { source, .. } => imgprobe_core::Error::Io(source),
            ToolError::Core(inner) => inner,
            other => imgprobe_core::Error::execution(other.to_string()),
        }
    }
}
