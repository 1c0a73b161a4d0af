//! qemu-img inspection and conversion

use crate::config::ToolConfig;
use crate::error::{Result, ToolError};
use imgprobe_core::{Executor, ImageInfo};
use imgprobe_parser::parse_image_info;
use std::path::Path;

/// Convert a path to a string, returning an error if it is not valid UTF-8
fn path_to_string(path: &Path) -> Result<String> {
    path.to_str()
        .map(str::to_string)
        .ok_or_else(|| ToolError::InvalidPath(format!("{:?}", path)))
}

/// Command line for `qemu-img info <path>`
///
/// Prefixed with `env LC_ALL=C LANG=C` when the config asks for it, except on
/// Windows where there is no `env` program.
pub fn info_command(config: &ToolConfig, path: &Path) -> Result<Vec<String>> {
    let mut argv = Vec::with_capacity(6);
    if config.force_c_locale && !cfg!(windows) {
        argv.extend(["env", "LC_ALL=C", "LANG=C"].map(String::from));
    }
    argv.push(path_to_string(&config.qemu_img)?);
    argv.push("info".to_string());
    argv.push(path_to_string(path)?);
    Ok(argv)
}

/// Command line for `qemu-img convert -O <format> <source> <dest>`
pub fn convert_command(
    config: &ToolConfig,
    source: &Path,
    dest: &Path,
    out_format: &str,
) -> Result<Vec<String>> {
    Ok(vec![
        path_to_string(&config.qemu_img)?,
        "convert".to_string(),
        "-O".to_string(),
        out_format.to_string(),
        path_to_string(source)?,
        path_to_string(dest)?,
    ])
}

/// Run `qemu-img info` on an image and parse its output
///
/// # Errors
///
/// Returns an error if the command cannot be run or its output contains a
/// malformed snapshot table.
pub fn inspect<E: Executor + ?Sized>(
    executor: &E,
    config: &ToolConfig,
    path: &Path,
) -> Result<ImageInfo> {
    let argv = info_command(config, path)?;
    let output = executor.execute(&argv)?;
    let info = parse_image_info(&output.stdout)?;
    tracing::debug!(
        "Inspected {}: format={:?}, snapshots={}",
        path.display(),
        info.file_format(),
        info.snapshots().len()
    );
    Ok(info)
}

/// Convert an image to another format with `qemu-img convert`
pub fn convert<E: Executor + ?Sized>(
    executor: &E,
    config: &ToolConfig,
    source: &Path,
    dest: &Path,
    out_format: &str,
) -> Result<()> {
    let argv = convert_command(config, source, dest, out_format)?;
    executor.execute(&argv)?;
    tracing::info!(
        "Converted {} to {} ({})",
        source.display(),
        dest.display(),
        out_format
    );
    Ok(())
}
