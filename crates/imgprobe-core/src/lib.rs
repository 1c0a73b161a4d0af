//! # imgprobe core
//!
//! Core types, traits, and error handling for imgprobe.
//!
//! This crate provides the foundational abstractions shared by the parser and
//! the tool wrappers:
//! - **ImageInfo**: The structured record parsed from `qemu-img info` output
//! - **Snapshot**: One row of the embedded snapshot table
//! - **ByteSize**: A size field, either converted to bytes or kept raw
//! - **Executor**: The command-execution collaborator that produces tool output
//!
//! ## Example
//!
//! ```rust,no_run
//! use imgprobe_core::{ImageInfo, Result};
//!
//! fn describe(info: &ImageInfo) -> Result<()> {
//!     println!("Format: {:?}", info.file_format());
//!     println!("Snapshots: {}", info.snapshots().len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use error::{Error, Result};
pub use traits::{ExecOutput, Executor};
pub use types::{ByteSize, FieldValue, ImageInfo, Snapshot};
