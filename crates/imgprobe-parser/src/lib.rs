//! # imgprobe parser
//!
//! Turns the human-readable output of `qemu-img info` into an [`ImageInfo`].
//!
//! The parse is a single forward pass:
//! - **scanner**: line cursor with lookahead
//! - **matcher**: `label: value` recognition and label canonicalization
//! - **field**: per-field transformation
//! - **bytes**: size text to byte counts
//! - **snapshot**: the embedded snapshot table
//!
//! ## Example
//!
//! ```rust
//! use imgprobe_parser::parse_image_info;
//!
//! let output = "image: disk.qcow2\n\
//!               file format: qcow2\n\
//!               virtual size: 5.0G (5368709120 bytes)\n";
//! let info = parse_image_info(output).unwrap();
//! assert_eq!(info.file_format(), Some("qcow2"));
//! assert_eq!(info.virtual_size().and_then(|s| s.bytes()), Some(5368709120));
//! ```

pub mod bytes;
pub mod field;
pub mod matcher;
pub mod scanner;
pub mod snapshot;

pub use bytes::{extract_bytes, to_bytes};
pub use field::FieldKey;
pub use scanner::LineCursor;

use imgprobe_core::{FieldValue, ImageInfo, Result};
use std::collections::BTreeMap;

/// Parse captured `qemu-img info` output
///
/// Unrecognized and blank lines are skipped. A later field with the same
/// canonical name replaces an earlier one.
///
/// # Errors
///
/// Fails only when a snapshot list is declared without its `ID` header line.
pub fn parse_image_info(output: &str) -> Result<ImageInfo> {
    let mut fields: BTreeMap<String, FieldValue> = BTreeMap::new();
    let mut cursor = LineCursor::new(output);

    while let Some(line) = cursor.next_line() {
        if scanner::is_blank(line) {
            continue;
        }

        let Some(top) = matcher::match_line(line) else {
            tracing::trace!("Skipping unrecognized line {}: {:?}", cursor.position(), line);
            continue;
        };

        let name = top.key();
        if name.is_empty() {
            continue;
        }

        let key = FieldKey::from_canonical(name);
        let value = field::transform(&key, top.rest.trim(), &mut cursor)?;
        fields.insert(key.as_str().to_string(), value);
    }

    Ok(ImageInfo::from_fields(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgprobe_core::{ByteSize, Error};

    const QCOW2_WITH_SNAPSHOTS: &str = "\
image: /var/lib/images/overlay.qcow2
file format: QCOW2
virtual size: 5.0G (5368709120 bytes)
disk size: 196K
cluster_size: 65536
backing file: base.qcow2 (actual path: /var/lib/images/base.qcow2)
encrypted: no
Snapshot list:
ID        TAG                 VM SIZE                DATE       VM CLOCK
1         clean                     0 2013-02-21 15:30:00   00:00:00.000
2         booted                 229M 2013-02-22 09:12:44   00:01:17.342
Format specific information:
    compat: 1.1
    lazy refcounts: false
";

    #[test]
    fn test_parse_full_output() {
        let info = parse_image_info(QCOW2_WITH_SNAPSHOTS).unwrap();

        assert_eq!(info.image(), Some("/var/lib/images/overlay.qcow2"));
        assert_eq!(info.file_format(), Some("qcow2"));
        assert_eq!(info.virtual_size(), Some(&ByteSize::Bytes(5368709120)));
        assert_eq!(info.disk_size(), Some(&ByteSize::Bytes(196 * 1024)));
        assert_eq!(info.cluster_size(), Some(&ByteSize::Bytes(65536)));
        assert_eq!(info.backing_file(), Some("/var/lib/images/base.qcow2"));
        assert_eq!(
            info.field("encrypted").and_then(FieldValue::as_text),
            Some("no")
        );

        let snapshots = info.snapshots();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[0].tag, "clean");
        assert_eq!(snapshots[1].vm_size, "229M");
        assert_eq!(snapshots[1].vm_clock, "09:12:44 00:01:17.342");
    }

    #[test]
    fn test_line_after_table_is_rescanned() {
        let info = parse_image_info(QCOW2_WITH_SNAPSHOTS).unwrap();
        assert_eq!(
            info.field("format_specific_information")
                .and_then(FieldValue::as_text),
            Some("")
        );
        assert_eq!(info.field("compat").and_then(FieldValue::as_text), Some("1.1"));
        assert_eq!(
            info.field("lazy_refcounts").and_then(FieldValue::as_text),
            Some("false")
        );
    }

    #[test]
    fn test_broken_row_ends_table() {
        let output = "\
Snapshot list:
ID TAG VM SIZE DATE VM CLOCK
1 a 0 2013-02-21 15:30:00 00:00:00.000
2 b 0 2013-02-21 15:30:00 00:00.000
image: after.img
";
        let info = parse_image_info(output).unwrap();
        assert_eq!(info.snapshots().len(), 1);
        assert_eq!(info.image(), Some("after.img"));
    }

    #[test]
    fn test_blank_line_ends_table() {
        let output = "\
Snapshot list:
ID TAG VM SIZE DATE VM CLOCK
1 a 0 2013-02-21 15:30:00 00:00:00.000
2 b 0 2013-02-21 15:30:00 00:00:01.000

disk size: 1M
";
        let info = parse_image_info(output).unwrap();
        assert_eq!(info.snapshots().len(), 2);
        assert_eq!(info.disk_size(), Some(&ByteSize::Bytes(1024 * 1024)));
    }

    #[test]
    fn test_snapshot_list_without_header_fails() {
        let output = "image: a.img\nSnapshot list:\n1 a 0 2013-02-21 15:30:00 00:00:00.000\n";
        let err = parse_image_info(output).unwrap_err();
        assert!(matches!(err, Error::MalformedSnapshotSection(_)));

        let err = parse_image_info("Snapshot list:").unwrap_err();
        assert!(matches!(err, Error::MalformedSnapshotSection(_)));
    }

    #[test]
    fn test_unknown_field_is_kept() {
        let info = parse_image_info("image: a.img\nfoo_bar: hello\n").unwrap();
        assert_eq!(info.field("foo_bar").and_then(FieldValue::as_text), Some("hello"));
        assert_eq!(info.image(), Some("a.img"));
        assert_eq!(info.fields().count(), 2);
    }

    #[test]
    fn test_empty_and_garbage_input() {
        assert_eq!(parse_image_info("").unwrap(), ImageInfo::default());

        let info = parse_image_info("\n   \n(no label) here\n/no/label/here\n").unwrap();
        assert_eq!(info.fields().count(), 0);
    }

    #[test]
    fn test_whitespace_label_is_ignored() {
        let info = parse_image_info("   : value\nimage: a.img").unwrap();
        assert_eq!(info.fields().count(), 1);
    }

    #[test]
    fn test_unconvertible_size_kept_as_text() {
        let info = parse_image_info("disk size: 1.5M\n").unwrap();
        assert_eq!(info.disk_size(), Some(&ByteSize::Raw("1.5M".to_string())));
    }

    #[test]
    fn test_spaced_unit_kept_as_text() {
        let info = parse_image_info("disk size: 4 kb\n").unwrap();
        assert_eq!(info.disk_size(), Some(&ByteSize::Raw("4 kb".to_string())));
    }

    #[test]
    fn test_backing_file_without_actual_path() {
        let info = parse_image_info("backing file: /tmp/foo.img\n").unwrap();
        assert_eq!(info.backing_file(), Some("/tmp/foo.img"));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let info = parse_image_info("image: first.img\nimage: second.img\n").unwrap();
        assert_eq!(info.image(), Some("second.img"));
    }

    #[test]
    fn test_rendering_round_trip() {
        let info = parse_image_info(QCOW2_WITH_SNAPSHOTS).unwrap();
        let rendered = info.to_string();
        let keys: Vec<&str> = rendered
            .lines()
            .filter_map(|l| l.split(':').next())
            .collect();
        assert_eq!(
            keys,
            vec![
                "image",
                "file_format",
                "virtual_size",
                "disk_size",
                "cluster_size",
                "backing_file",
                "snapshots",
            ]
        );

        let plain = parse_image_info("image: a.img\n").unwrap();
        assert_eq!(plain.to_string().lines().count(), 6);
    }
}
