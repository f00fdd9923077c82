//! Binary Layout Module
//!
//! The on-disk contract of a container file. Serialization only, no I/O.
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Superblock (12 bytes, offset 0)                          │
//! │   Count: i32 (4) | DirectoryOffset: i64 (8)              │
//! ├──────────────────────────────────────────────────────────┤
//! │ Payload Region (append-only)                             │
//! │   raw document bytes, dead payloads, dead directories    │
//! ├──────────────────────────────────────────────────────────┤
//! │ Directory (Count × 280 bytes, at DirectoryOffset)        │
//! │   Name: [u8; 256] | Size: i64 | InsertedAt: i64 |        │
//! │   Offset: i64                                            │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian. Names are UTF-8, NUL padded, and always
//! leave room for at least one terminating NUL.

mod entry;
mod superblock;

pub use entry::{validate_name, DocumentEntry, ENTRY_SIZE, MAX_NAME_LEN, NAME_FIELD_SIZE};
pub use superblock::{Superblock, SUPERBLOCK_SIZE};

/// Encode a directory as one contiguous byte run
pub fn encode_directory(entries: &[DocumentEntry]) -> crate::error::Result<Vec<u8>> {
    let mut buf = bytes::BytesMut::with_capacity(entries.len() * ENTRY_SIZE);
    for entry in entries {
        entry.encode_into(&mut buf)?;
    }
    Ok(buf.to_vec())
}

/// Decode `count` entries from a directory byte run
pub fn decode_directory(bytes: &[u8], count: usize) -> crate::error::Result<Vec<DocumentEntry>> {
    if bytes.len() != count * ENTRY_SIZE {
        return Err(crate::DocboxError::CorruptDirectory(format!(
            "expected {} bytes for {} entries, got {}",
            count * ENTRY_SIZE,
            count,
            bytes.len()
        )));
    }

    bytes
        .chunks_exact(ENTRY_SIZE)
        .map(DocumentEntry::decode)
        .collect()
}
