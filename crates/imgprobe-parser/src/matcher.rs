//! Top-level `label: value` line recognition

use regex::Regex;
use std::sync::LazyLock;

static TOP_LEVEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w\s_\-]+):(.*)$").expect("valid top-level pattern"));

/// A line of the form `<label>: <rest>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopLevel<'a> {
    /// Label exactly as printed
    pub label: &'a str,

    /// Everything after the first colon, untrimmed
    pub rest: &'a str,
}

impl TopLevel<'_> {
    /// Canonical form of the label
    pub fn key(&self) -> String {
        canonicalize(self.label)
    }
}

/// Match a single line against the top-level pattern
pub fn match_line(line: &str) -> Option<TopLevel<'_>> {
    let caps = TOP_LEVEL_PATTERN.captures(line)?;
    Some(TopLevel {
        label: caps.get(1)?.as_str(),
        rest: caps.get(2)?.as_str(),
    })
}

/// Normalize a label: lowercase, trimmed, spaces and dashes become underscores
///
/// qemu-img mixes `file format`, `virtual size` and `cluster_size` style
/// labels across versions.
pub fn canonicalize(label: &str) -> String {
    label.trim().to_lowercase().replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_simple_field() {
        let top = match_line("file format: qcow2").unwrap();
        assert_eq!(top.label, "file format");
        assert_eq!(top.rest, " qcow2");
        assert_eq!(top.key(), "file_format");
    }

    #[test]
    fn test_match_splits_on_first_colon() {
        let top = match_line("backing file: /a.img (actual path: /b.img)").unwrap();
        assert_eq!(top.key(), "backing_file");
        assert_eq!(top.rest, " /a.img (actual path: /b.img)");
    }

    #[test]
    fn test_match_empty_rest() {
        let top = match_line("Snapshot list:").unwrap();
        assert_eq!(top.key(), "snapshot_list");
        assert_eq!(top.rest, "");
    }

    #[test]
    fn test_no_match() {
        assert!(match_line("no colon here").is_none());
        assert!(match_line("/path/with:colon").is_none());
        assert!(match_line(": leading colon").is_none());
    }

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize("  Virtual Size "), "virtual_size");
        assert_eq!(canonicalize("lazy-refcounts"), "lazy_refcounts");
        assert_eq!(canonicalize("cluster_size"), "cluster_size");
        assert_eq!(canonicalize("   "), "");
    }
}
