//! Per-field transformation of top-level values

use crate::bytes::extract_bytes;
use crate::scanner::LineCursor;
use crate::snapshot::parse_snapshot_table;
use imgprobe_core::types::{
    BACKING_FILE, CLUSTER_SIZE, DISK_SIZE, ENCRYPTION, FILE_FORMAT, IMAGE, SNAPSHOT_LIST,
    VIRTUAL_SIZE,
};
use imgprobe_core::{FieldValue, Result};
use regex::Regex;
use std::sync::LazyLock;

static BACKING_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.*?)\s*\(actual\s+path\s*:\s+(.*?)\)\s*$")
        .expect("valid backing file pattern")
});

/// A recognized top-level field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey {
    Image,
    BackingFile,
    FileFormat,
    VirtualSize,
    ClusterSize,
    DiskSize,
    Encryption,
    SnapshotList,
    /// Any other label, by canonical name
    Other(String),
}

impl FieldKey {
    /// Classify a canonical label
    pub fn from_canonical(name: String) -> Self {
        match name.as_str() {
            IMAGE => FieldKey::Image,
            BACKING_FILE => FieldKey::BackingFile,
            FILE_FORMAT => FieldKey::FileFormat,
            VIRTUAL_SIZE => FieldKey::VirtualSize,
            CLUSTER_SIZE => FieldKey::ClusterSize,
            DISK_SIZE => FieldKey::DiskSize,
            ENCRYPTION => FieldKey::Encryption,
            SNAPSHOT_LIST => FieldKey::SnapshotList,
            _ => FieldKey::Other(name),
        }
    }

    /// Canonical name the value is stored under
    pub fn as_str(&self) -> &str {
        match self {
            FieldKey::Image => IMAGE,
            FieldKey::BackingFile => BACKING_FILE,
            FieldKey::FileFormat => FILE_FORMAT,
            FieldKey::VirtualSize => VIRTUAL_SIZE,
            FieldKey::ClusterSize => CLUSTER_SIZE,
            FieldKey::DiskSize => DISK_SIZE,
            FieldKey::Encryption => ENCRYPTION,
            FieldKey::SnapshotList => SNAPSHOT_LIST,
            FieldKey::Other(name) => name,
        }
    }
}

/// Transform the trimmed value of a field
///
/// `cursor` sits on the line after the field. Only the snapshot table moves it.
pub fn transform(key: &FieldKey, details: &str, cursor: &mut LineCursor<'_>) -> Result<FieldValue> {
    let value = match key {
        FieldKey::BackingFile => FieldValue::Text(extract_backing_file(details).to_string()),
        FieldKey::VirtualSize | FieldKey::ClusterSize | FieldKey::DiskSize => {
            FieldValue::Size(extract_bytes(details))
        }
        FieldKey::FileFormat => FieldValue::Text(details.trim().to_lowercase()),
        FieldKey::SnapshotList => FieldValue::Snapshots(parse_snapshot_table(cursor)?),
        FieldKey::Image | FieldKey::Encryption | FieldKey::Other(_) => {
            FieldValue::Text(details.to_string())
        }
    };
    Ok(value)
}

/// Real path of a backing file displayed as `<path> (actual path: <real>)`
///
/// Text without the `actual path` annotation is returned unchanged.
pub fn extract_backing_file(details: &str) -> &str {
    BACKING_FILE_PATTERN
        .captures(details)
        .and_then(|caps| caps.get(2))
        .map_or(details, |m| m.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgprobe_core::ByteSize;

    #[test]
    fn test_classify() {
        assert_eq!(FieldKey::from_canonical("image".into()), FieldKey::Image);
        assert_eq!(
            FieldKey::from_canonical("snapshot_list".into()),
            FieldKey::SnapshotList
        );
        let other = FieldKey::from_canonical("foo_bar".into());
        assert_eq!(other, FieldKey::Other("foo_bar".into()));
        assert_eq!(other.as_str(), "foo_bar");
        assert_eq!(FieldKey::DiskSize.as_str(), "disk_size");
    }

    #[test]
    fn test_backing_file_actual_path() {
        assert_eq!(
            extract_backing_file("/tmp/foo.img (actual path: /var/lib/images/foo.img)"),
            "/var/lib/images/foo.img"
        );
        assert_eq!(
            extract_backing_file("base.qcow2 (ACTUAL PATH :  /srv/base.qcow2 )"),
            "/srv/base.qcow2"
        );
    }

    #[test]
    fn test_backing_file_verbatim() {
        assert_eq!(extract_backing_file("/tmp/foo.img"), "/tmp/foo.img");
        assert_eq!(
            extract_backing_file("/tmp/foo.img (actual path:/x)"),
            "/tmp/foo.img (actual path:/x)"
        );
    }

    #[test]
    fn test_transform_values() {
        let mut cursor = LineCursor::new("");
        assert_eq!(
            transform(&FieldKey::FileFormat, "QCOW2", &mut cursor).unwrap(),
            FieldValue::Text("qcow2".into())
        );
        assert_eq!(
            transform(&FieldKey::VirtualSize, "5.0G (5368709120 bytes)", &mut cursor).unwrap(),
            FieldValue::Size(ByteSize::Bytes(5368709120))
        );
        assert_eq!(
            transform(&FieldKey::Encryption, "yes", &mut cursor).unwrap(),
            FieldValue::Text("yes".into())
        );
        assert_eq!(cursor.position(), 0);
    }
}
