//! Human-readable size conversion
//!
//! qemu-img prints sizes like `5.0G (5368709120 bytes)`, `196K` or a bare byte
//! count depending on the field and the tool version. Multipliers are binary:
//!
//! | suffix | multiplier |
//! |--------|------------|
//! | `B` or none | 1 |
//! | `K`, `KB` | 1024 |
//! | `M`, `MB` | 1024^2 |
//! | `G`, `GB` | 1024^3 |
//! | `T`, `TB` | 1024^4 |
//!
//! Suffixes are case-insensitive.

use imgprobe_core::{ByteSize, Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static BYTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?[0-9]+)([^0-9]*)").expect("valid byte pattern"));

static SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*([0-9]+)\s+bytes\s*\)").expect("valid size pattern")
});

const KIB: i64 = 1024;

/// Multiplier for a normalized (lowercase, unit letter stripped) suffix
fn multiplier(key: &str) -> Option<i64> {
    match key {
        "" => Some(1),
        "k" => Some(KIB),
        "m" => Some(KIB.pow(2)),
        "g" => Some(KIB.pow(3)),
        "t" => Some(KIB.pow(4)),
        _ => None,
    }
}

/// Convert `<integer>[<unit>]` text into a byte count
///
/// Empty text yields `default`. Anything after the unit suffix (for example
/// the `0G` in `5.0G`) is not examined, so `5.0G` is rejected because `.` is
/// not a known unit.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the text does not start with an
/// integer, the unit is unknown, or the result does not fit in an `i64`.
pub fn to_bytes(text: &str, default: i64) -> Result<i64> {
    let Some(caps) = BYTE_PATTERN.captures(text) else {
        if text.is_empty() {
            return Ok(default);
        }
        return Err(Error::invalid_format(format!(
            "Invalid string format: {}",
            text
        )));
    };

    let digits = &caps[1];
    let magnitude: i64 = digits.parse().map_err(|_| {
        Error::invalid_format(format!("Byte count out of range: {}", digits))
    })?;

    let suffix = &caps[2];
    if suffix.is_empty() {
        return Ok(magnitude);
    }

    let normalized = suffix.to_lowercase();
    let key = normalized.strip_suffix('b').unwrap_or(&normalized);
    let multiplier = multiplier(key).ok_or_else(|| {
        Error::invalid_format(format!("Unknown byte multiplier: {}", suffix))
    })?;

    magnitude
        .checked_mul(multiplier)
        .ok_or_else(|| Error::invalid_format(format!("Byte count overflow: {}", text)))
}

/// Convert a size field, preferring a parenthetical `(<n> bytes)` count
///
/// Conversion failures are not errors: the (possibly narrowed) text is kept.
pub fn extract_bytes(details: &str) -> ByteSize {
    let text = SIZE_PATTERN
        .captures(details)
        .and_then(|caps| caps.get(1))
        .map_or(details, |m| m.as_str());

    match to_bytes(text, 0) {
        Ok(n) => ByteSize::Bytes(n),
        Err(e) => {
            tracing::trace!("Keeping size as text: {}", e);
            ByteSize::Raw(text.to_string())
        }
    }
}
