//! qemu-img invocation settings

use std::path::PathBuf;

/// Default qemu-img program name, resolved through `PATH`
pub const DEFAULT_QEMU_IMG: &str = "qemu-img";

/// Configuration for running qemu-img
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// qemu-img program to run
    pub qemu_img: PathBuf,

    /// Run inspection under `env LC_ALL=C LANG=C` so labels are not translated
    pub force_c_locale: bool,

    /// Treat a non-zero exit status as an error
    pub check_status: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            qemu_img: PathBuf::from(DEFAULT_QEMU_IMG),
            force_c_locale: true,
            check_status: true,
        }
    }
}

impl ToolConfig {
    /// Create config from environment variables
    ///
    /// - `IMGPROBE_QEMU_IMG`: qemu-img program path
    /// - `IMGPROBE_FORCE_C_LOCALE`: `true`/`1` or `false`/`0`
    /// - `IMGPROBE_CHECK_STATUS`: `true`/`1` or `false`/`0`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let qemu_img = std::env::var_os("IMGPROBE_QEMU_IMG")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.qemu_img);

        let force_c_locale = std::env::var("IMGPROBE_FORCE_C_LOCALE")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.force_c_locale);

        let check_status = std::env::var("IMGPROBE_CHECK_STATUS")
            .ok()
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.check_status);

        Self {
            qemu_img,
            force_c_locale,
            check_status,
        }
    }

    /// Override the qemu-img program
    pub fn with_qemu_img(mut self, qemu_img: impl Into<PathBuf>) -> Self {
        self.qemu_img = qemu_img.into();
        self
    }

    /// Enable or disable the C locale prefix
    pub fn with_force_c_locale(mut self, force: bool) -> Self {
        self.force_c_locale = force;
        self
    }

    /// Enable or disable the exit-status check
    pub fn with_check_status(mut self, check: bool) -> Self {
        self.check_status = check;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
