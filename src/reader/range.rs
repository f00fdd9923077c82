//! Byte-range reads

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;

use crate::error::{DocboxError, IoContext, Result};
use crate::layout::DocumentEntry;
use crate::store::{open_read, read_full};

/// Read up to `max_bytes` of `entry`'s payload, starting `offset` bytes into
/// the document
///
/// Returns:
/// - `Ok(bytes)` with `min(max_bytes, entry.size - offset)` bytes
/// - `Ok(empty)` when `offset == entry.size`
/// - `Err(OutOfRange)` when `offset > entry.size`
///
/// Never reads outside `[entry.offset, entry.offset + entry.size)`.
pub fn read_range(container_path: impl AsRef<Path>, entry: &DocumentEntry, offset: u64, max_bytes: usize) -> Result<Vec<u8>> {
    let path = container_path.as_ref();
    let mut file = open_read(path)?;
    read_range_from(&mut file, entry, offset, max_bytes).at("read payload", path)
}

pub(crate) fn read_range_from(file: &mut File, entry: &DocumentEntry, offset: u64, max_bytes: usize) -> Result<Vec<u8>> {
    if offset > entry.size {
        return Err(DocboxError::OutOfRange {
            name: entry.name.clone(),
            offset,
            size: entry.size,
        });
    }

    let remaining = entry.size - offset;
    let len = remaining.min(max_bytes as u64) as usize;
    if len == 0 {
        return Ok(Vec::new());
    }

    let mut buf = vec![0u8; len];
    file.seek(SeekFrom::Start(entry.offset + offset))?;
    read_full(file, &mut buf, "document payload")?;
    Ok(buf)
}
