//! Parse and execution error types

use thiserror::Error;

/// The main error type for imgprobe operations
#[derive(Error, Debug)]
pub enum Error {
    /// Byte string does not match `<integer>[<unit>]` or uses an unknown unit
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A snapshot list was declared but no `ID` header line follows it
    #[error("Malformed snapshot section: {0}")]
    MalformedSnapshotSection(String),

    /// I/O error while talking to an external tool
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// External command could not be run or reported failure
    #[error("Execution failed: {0}")]
    Execution(String),
}

/// Result type alias for imgprobe operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid format error
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Error::InvalidFormat(msg.into())
    }

    /// Create a malformed snapshot section error
    pub fn malformed_snapshot_section(msg: impl Into<String>) -> Self {
        Error::MalformedSnapshotSection(msg.into())
    }

    /// Create an execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        Error::Execution(msg.into())
    }
}
