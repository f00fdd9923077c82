//! Document Entry
//!
//! One fixed-size directory record per stored document.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{DocboxError, Result};

/// Width of the on-disk name field
pub const NAME_FIELD_SIZE: usize = 256;

/// Longest name in bytes; the field always keeps a terminating NUL
pub const MAX_NAME_LEN: usize = NAME_FIELD_SIZE - 1;

/// Entry size: Name (256) + Size (8) + InsertedAt (8) + Offset (8) = 280 bytes
pub const ENTRY_SIZE: usize = NAME_FIELD_SIZE + 24;

/// Metadata of one stored document. The payload itself lives in the file at
/// `[offset, offset + size)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    /// Unique, case-sensitive document name
    pub name: String,
    /// Payload length in bytes
    pub size: u64,
    /// Unix seconds of the add or replace that produced this payload
    pub inserted_at: i64,
    /// Absolute offset of the payload
    pub offset: u64,
}

/// Check a name against the format's constraints
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.len() > MAX_NAME_LEN {
        "name is longer than 255 bytes"
    } else if name.as_bytes().contains(&0) {
        "name contains a NUL byte"
    } else {
        return Ok(());
    };

    Err(DocboxError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

impl DocumentEntry {
    pub fn new(name: impl Into<String>, size: u64, inserted_at: i64, offset: u64) -> Self {
        Self {
            name: name.into(),
            size,
            inserted_at,
            offset,
        }
    }

    /// One past the last payload byte
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }

    /// Append the 280-byte record to `buf`
    pub fn encode_into(&self, buf: &mut BytesMut) -> Result<()> {
        validate_name(&self.name)?;

        let mut name_field = [0u8; NAME_FIELD_SIZE];
        name_field[..self.name.len()].copy_from_slice(self.name.as_bytes());

        buf.reserve(ENTRY_SIZE);
        buf.put_slice(&name_field);
        buf.put_i64_le(self.size as i64);
        buf.put_i64_le(self.inserted_at);
        buf.put_i64_le(self.offset as i64);
        Ok(())
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = BytesMut::with_capacity(ENTRY_SIZE);
        self.encode_into(&mut buf)?;
        Ok(buf.to_vec())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ENTRY_SIZE {
            return Err(DocboxError::CorruptDirectory(format!(
                "entry record is {} bytes, expected {}",
                bytes.len(),
                ENTRY_SIZE
            )));
        }

        let (name_field, mut rest) = bytes.split_at(NAME_FIELD_SIZE);
        let name_len = name_field
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| DocboxError::CorruptDirectory("name is not NUL terminated".to_string()))?;
        let name = std::str::from_utf8(&name_field[..name_len])
            .map_err(|_| DocboxError::CorruptDirectory("name is not valid UTF-8".to_string()))?
            .to_string();
        if name.is_empty() {
            return Err(DocboxError::CorruptDirectory("empty document name".to_string()));
        }

        let size = rest.get_i64_le();
        let inserted_at = rest.get_i64_le();
        let offset = rest.get_i64_le();

        if size < 0 || offset < 0 {
            return Err(DocboxError::CorruptDirectory(format!(
                "'{}' has negative size {} or offset {}",
                name, size, offset
            )));
        }

        Ok(Self {
            name,
            size: size as u64,
            inserted_at,
            offset: offset as u64,
        })
    }
}
