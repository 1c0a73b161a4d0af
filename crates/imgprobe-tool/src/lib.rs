//! qemu-img invocation crate
//!
//! Provides functionality for:
//! - Running commands as child processes (`ProcessExecutor`)
//! - Inspecting images with `qemu-img info` and parsing the result
//! - Converting images with `qemu-img convert`
//!
//! Everything that runs a command goes through the `Executor` trait, so tests
//! and embedders can substitute their own execution facility.

pub mod config;
pub mod error;
pub mod process;
pub mod qemu_img;

pub use config::ToolConfig;
pub use error::{Result, ToolError};
pub use process::ProcessExecutor;
pub use qemu_img::{convert, convert_command, info_command, inspect};
