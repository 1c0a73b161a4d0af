//! imgprobe CLI - qemu-img inspection tool
//!
//! Runs `qemu-img info` (or reads captured output) and prints the parsed
//! image description as text or JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imgprobe_core::ImageInfo;
use imgprobe_parser::parse_image_info;
use imgprobe_tool::{ProcessExecutor, ToolConfig};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "imgprobe")]
#[command(about = "Inspect and convert disk images through qemu-img")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// qemu-img program to run
    #[arg(long, env = "IMGPROBE_QEMU_IMG", global = true)]
    qemu_img: Option<PathBuf>,

    /// Run qemu-img with the caller's locale instead of LC_ALL=C
    #[arg(long, global = true)]
    no_c_locale: bool,

    /// Keep going when qemu-img exits with a non-zero status
    #[arg(long, global = true)]
    ignore_exit_status: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run qemu-img info on an image and print the parsed result
    Info {
        /// Disk image to inspect
        image: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Parse captured qemu-img info output from a file or stdin
    Parse {
        /// File with captured output (stdin when absent or `-`)
        file: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Convert an image to another format
    Convert {
        /// Output format (e.g. qcow2, raw, vmdk)
        #[arg(short = 'O', long = "output-format")]
        format: String,

        /// Source image
        source: PathBuf,

        /// Destination image
        dest: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(&cli.log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = tool_config(&cli);
    let executor = ProcessExecutor::new(config.check_status);

    match cli.command {
        Command::Info { image, json } => {
            let info = imgprobe_tool::inspect(&executor, &config, &image)
                .with_context(|| format!("Failed to inspect {}", image.display()))?;
            println!("{}", render(&info, json)?);
        }

        Command::Parse { file, json } => {
            let text = read_input(file.as_deref())?;
            let info = parse_image_info(&text).context("Failed to parse qemu-img output")?;
            println!("{}", render(&info, json)?);
        }

        Command::Convert { format, source, dest } => {
            imgprobe_tool::convert(&executor, &config, &source, &dest, &format).with_context(
                || format!("Failed to convert {} to {}", source.display(), format),
            )?;
        }
    }

    Ok(())
}

/// Environment config with command-line overrides applied
fn tool_config(cli: &Cli) -> ToolConfig {
    let mut config = ToolConfig::from_env();
    if let Some(ref qemu_img) = cli.qemu_img {
        config = config.with_qemu_img(qemu_img.clone());
    }
    if cli.no_c_locale {
        config = config.with_force_c_locale(false);
    }
    if cli.ignore_exit_status {
        config = config.with_check_status(false);
    }
    config
}

/// Read captured output from a file, or stdin for `None` / `-`
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn render(info: &ImageInfo, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(info)?)
    } else {
        Ok(info.to_string())
    }
}
