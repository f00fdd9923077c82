//! Container verification
//!
//! Read-only consistency check, meant for use after a failed mutation.
//! Also reports how much of the file is dead space.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{DocboxError, IoContext, Result};
use crate::layout::{DocumentEntry, SUPERBLOCK_SIZE};

use super::file::{open_read, read_directory, read_superblock};
use super::lock::LockedFile;

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyReport {
    /// Total file length
    pub file_len: u64,
    /// Entries in the live directory
    pub count: u32,
    /// Where the live directory starts
    pub directory_offset: u64,
    /// Bytes referenced by live entries
    pub live_bytes: u64,
    /// Bytes referenced by nothing: replaced or removed payloads and old
    /// directories
    pub dead_bytes: u64,
}

/// Verify the container at `path` with default config
pub fn verify(path: impl AsRef<Path>) -> Result<VerifyReport> {
    verify_with_config(path.as_ref(), &Config::default())
}

pub(crate) fn verify_with_config(path: &Path, config: &Config) -> Result<VerifyReport> {
    let file = open_read(path)?;
    let mut file = LockedFile::shared(file, path, config.lock_files)?;

    let file_len = file.metadata().at("stat", path)?.len();
    let superblock = read_superblock(&mut file).at("read superblock", path)?;
    let mut entries = read_directory(&mut file, &superblock).at("read directory", path)?;

    check_extents(&mut entries, superblock.directory_offset)?;

    let live_bytes: u64 = entries.iter().map(|e| e.size).sum();
    let used = SUPERBLOCK_SIZE as u64 + superblock.directory_len() + live_bytes;

    let report = VerifyReport {
        file_len,
        count: superblock.count,
        directory_offset: superblock.directory_offset,
        live_bytes,
        dead_bytes: file_len.saturating_sub(used),
    };

    debug!(path = %path.display(), ?report, "container verified");
    Ok(report)
}

/// Live payloads must not overlap each other and must all precede the live
/// directory. Sorts `entries` by offset.
fn check_extents(entries: &mut [DocumentEntry], directory_offset: u64) -> Result<()> {
    entries.sort_by_key(|e| e.offset);

    for pair in entries.windows(2) {
        if pair[0].end() > pair[1].offset {
            return Err(DocboxError::CorruptDirectory(format!(
                "payloads of '{}' and '{}' overlap",
                pair[0].name, pair[1].name
            )));
        }
    }

    if let Some(last) = entries.last() {
        if last.end() > directory_offset {
            return Err(DocboxError::CorruptDirectory(format!(
                "payload of '{}' runs into the directory at {}",
                last.name, directory_offset
            )));
        }
    }

    Ok(())
}
