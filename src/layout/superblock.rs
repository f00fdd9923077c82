//! Superblock
//!
//! Fixed-size header at offset 0 naming where the live directory lives.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{DocboxError, Result};

/// Superblock size: Count (4) + DirectoryOffset (8) = 12 bytes
pub const SUPERBLOCK_SIZE: usize = 12;

/// Container header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Superblock {
    /// Number of directory entries
    pub count: u32,
    /// Absolute offset of the directory
    pub directory_offset: u64,
}

impl Superblock {
    /// Header of a freshly created container: no entries, directory right
    /// after the superblock.
    pub fn empty() -> Self {
        Self {
            count: 0,
            directory_offset: SUPERBLOCK_SIZE as u64,
        }
    }

    pub fn encode(&self) -> [u8; SUPERBLOCK_SIZE] {
        let mut buf = BytesMut::with_capacity(SUPERBLOCK_SIZE);
        // count never exceeds i32::MAX, see Directory::insert
        buf.put_i32_le(self.count as i32);
        buf.put_i64_le(self.directory_offset as i64);

        let mut out = [0u8; SUPERBLOCK_SIZE];
        out.copy_from_slice(&buf);
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SUPERBLOCK_SIZE {
            return Err(DocboxError::CorruptHeader(format!(
                "need {} bytes, got {}",
                SUPERBLOCK_SIZE,
                bytes.len()
            )));
        }

        let mut buf = &bytes[..SUPERBLOCK_SIZE];
        let count = buf.get_i32_le();
        let directory_offset = buf.get_i64_le();

        if count < 0 {
            return Err(DocboxError::CorruptHeader(format!("negative entry count {}", count)));
        }
        if directory_offset < SUPERBLOCK_SIZE as i64 {
            return Err(DocboxError::CorruptHeader(format!(
                "directory offset {} overlaps the superblock",
                directory_offset
            )));
        }

        Ok(Self {
            count: count as u32,
            directory_offset: directory_offset as u64,
        })
    }

    /// Byte length of the directory this header describes
    pub fn directory_len(&self) -> u64 {
        self.count as u64 * super::ENTRY_SIZE as u64
    }

    /// Check that the directory region fits in a file of `file_len` bytes
    pub fn check_against(&self, file_len: u64) -> Result<()> {
        let end = self
            .directory_offset
            .checked_add(self.directory_len())
            .ok_or_else(|| DocboxError::CorruptHeader("directory end overflows".to_string()))?;

        if end > file_len {
            return Err(DocboxError::CorruptHeader(format!(
                "directory [{}, {}) extends past end of file ({} bytes)",
                self.directory_offset, end, file_len
            )));
        }
        Ok(())
    }
}
