//! Core types for imgprobe

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Canonical key of the image path field
pub const IMAGE: &str = "image";
/// Canonical key of the backing file field
pub const BACKING_FILE: &str = "backing_file";
/// Canonical key of the file format field
pub const FILE_FORMAT: &str = "file_format";
/// Canonical key of the virtual size field
pub const VIRTUAL_SIZE: &str = "virtual_size";
/// Canonical key of the cluster size field
pub const CLUSTER_SIZE: &str = "cluster_size";
/// Canonical key of the disk size field
pub const DISK_SIZE: &str = "disk_size";
/// Canonical key of the encryption field
pub const ENCRYPTION: &str = "encryption";
/// Canonical key of the snapshot table field
pub const SNAPSHOT_LIST: &str = "snapshot_list";

/// A size field value
///
/// Conversion to bytes is best-effort: text the byte converter rejects is kept
/// verbatim instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ByteSize {
    /// Size converted to a byte count
    Bytes(i64),
    /// Text that could not be converted
    Raw(String),
}

impl ByteSize {
    /// Byte count, if the conversion succeeded
    pub fn bytes(&self) -> Option<i64> {
        match self {
            ByteSize::Bytes(n) => Some(*n),
            ByteSize::Raw(_) => None,
        }
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteSize::Bytes(n) => write!(f, "{}", n),
            ByteSize::Raw(s) => write!(f, "{}", s),
        }
    }
}

/// One row of the snapshot table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Snapshot identifier
    pub id: String,

    /// Snapshot tag (name)
    pub tag: String,

    /// Saved VM state size, as displayed
    pub vm_size: String,

    /// Creation date, as displayed
    pub date: String,

    /// The two trailing columns joined by one space
    pub vm_clock: String,
}

impl Snapshot {
    /// Creation timestamp built from `date` and the time-of-day half of `vm_clock`
    ///
    /// Returns `None` when either part is not in `YYYY-MM-DD` / `HH:MM:SS` form.
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        let time = self.vm_clock.split_whitespace().next()?;
        NaiveDateTime::parse_from_str(&format!("{} {}", self.date, time), "%Y-%m-%d %H:%M:%S")
            .ok()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.id, self.tag, self.vm_size, self.date, self.vm_clock
        )
    }
}

/// Value stored for one top-level field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Plain text (identity, backing file, format and unknown fields)
    Text(String),
    /// Size field
    Size(ByteSize),
    /// Snapshot table
    Snapshots(Vec<Snapshot>),
}

impl FieldValue {
    /// Text content, if this is a text field
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Size content, if this is a size field
    pub fn as_size(&self) -> Option<&ByteSize> {
        match self {
            FieldValue::Size(size) => Some(size),
            _ => None,
        }
    }

    /// Snapshot rows, if this is a snapshot table
    pub fn as_snapshots(&self) -> Option<&[Snapshot]> {
        match self {
            FieldValue::Snapshots(rows) => Some(rows),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Size(size) => write!(f, "{}", size),
            FieldValue::Snapshots(rows) => {
                write!(f, "[")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", row)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Structured description of a disk image, as reported by `qemu-img info`
///
/// Fields are keyed by their canonical name. Fields the parser has no special
/// handling for are still available through [`ImageInfo::field`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageInfo {
    fields: BTreeMap<String, FieldValue>,
}

impl ImageInfo {
    /// Create an image info record from canonical fields
    pub fn from_fields(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    /// Look up a field by canonical key
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// All fields, ordered by canonical key
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Image path or identifier
    pub fn image(&self) -> Option<&str> {
        self.text(IMAGE)
    }

    /// Backing file, resolved to its real path when the tool reports one
    pub fn backing_file(&self) -> Option<&str> {
        self.text(BACKING_FILE)
    }

    /// Lowercase image format name (e.g. `qcow2`)
    pub fn file_format(&self) -> Option<&str> {
        self.text(FILE_FORMAT)
    }

    /// Virtual (guest-visible) size
    pub fn virtual_size(&self) -> Option<&ByteSize> {
        self.size(VIRTUAL_SIZE)
    }

    /// Cluster size
    pub fn cluster_size(&self) -> Option<&ByteSize> {
        self.size(CLUSTER_SIZE)
    }

    /// Space used on the host
    pub fn disk_size(&self) -> Option<&ByteSize> {
        self.size(DISK_SIZE)
    }

    /// Encryption flag, unmodified
    pub fn encryption(&self) -> Option<&str> {
        self.text(ENCRYPTION)
    }

    /// Snapshot table rows, empty if none were declared
    pub fn snapshots(&self) -> &[Snapshot] {
        self.fields
            .get(SNAPSHOT_LIST)
            .and_then(FieldValue::as_snapshots)
            .unwrap_or(&[])
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(FieldValue::as_text)
    }

    fn size(&self, key: &str) -> Option<&ByteSize> {
        self.fields.get(key).and_then(FieldValue::as_size)
    }
}

impl FromIterator<(String, FieldValue)> for ImageInfo {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in [IMAGE, FILE_FORMAT, VIRTUAL_SIZE, DISK_SIZE, CLUSTER_SIZE] {
            writeln!(f, "{}: {}", key, Rendered(self.fields.get(key)))?;
        }
        write!(f, "{}: {}", BACKING_FILE, Rendered(self.fields.get(BACKING_FILE)))?;

        let snapshots = self.snapshots();
        if !snapshots.is_empty() {
            let list = FieldValue::Snapshots(snapshots.to_vec());
            write!(f, "\nsnapshots: {}", list)?;
        }
        Ok(())
    }
}

/// Renders a missing field as `-`
struct Rendered<'a>(Option<&'a FieldValue>);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "-"),
        }
    }
}
