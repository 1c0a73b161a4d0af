//! Snapshot table parsing
//!
//! qemu-img prints internal snapshots as a fixed-column table right after the
//! `Snapshot list:` line:
//!
//! ```text
//! Snapshot list:
//! ID        TAG                 VM SIZE                DATE       VM CLOCK
//! 1         snap1                     0 2013-02-21 15:30:00   00:00:00.000
//! ```
//!
//! Rows are printed with `"%-10s%-20s%7s%20s%15s"`, so a well-formed row splits
//! into six whitespace-separated tokens and the last one looks like
//! `HH:MM:SS.mmm`.

use crate::scanner::LineCursor;
use imgprobe_core::{Error, Result, Snapshot};

/// Token every snapshot table header starts with
pub const HEADER_TOKEN: &str = "ID";

const ROW_TOKENS: usize = 6;
const CLOCK_COMPONENTS: usize = 3;

/// Parse the snapshot table starting at the cursor
///
/// The cursor must sit on the line right after `Snapshot list:`. It is left on
/// the first line that is not part of the table, so that line is scanned again
/// as an ordinary field.
///
/// # Errors
///
/// Returns [`Error::MalformedSnapshotSection`] if the next line is missing or
/// does not start with `ID`.
pub fn parse_snapshot_table(cursor: &mut LineCursor<'_>) -> Result<Vec<Snapshot>> {
    match cursor.peek(0) {
        Some(line) if line.starts_with(HEADER_TOKEN) => cursor.advance(1),
        Some(line) => {
            return Err(Error::malformed_snapshot_section(format!(
                "Snapshot list encountered but no header found (got {:?})",
                line
            )))
        }
        None => {
            return Err(Error::malformed_snapshot_section(
                "Snapshot list encountered but no header found",
            ))
        }
    }

    let mut rows = Vec::new();
    while let Some(row) = cursor.peek(0).and_then(parse_row) {
        rows.push(row);
        cursor.advance(1);
    }

    tracing::trace!("Parsed {} snapshot rows", rows.len());
    Ok(rows)
}

/// Parse one table row, or `None` if the line does not have the row shape
pub fn parse_row(line: &str) -> Option<Snapshot> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != ROW_TOKENS {
        return None;
    }
    if tokens[5].split(':').count() != CLOCK_COMPONENTS {
        return None;
    }

    Some(Snapshot {
        id: tokens[0].to_string(),
        tag: tokens[1].to_string(),
        vm_size: tokens[2].to_string(),
        date: tokens[3].to_string(),
        vm_clock: format!("{} {}", tokens[4], tokens[5]),
    })
}
