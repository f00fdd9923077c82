//! Low-level container file I/O
//!
//! Every transfer is checked for length; short transfers surface as
//! `ShortRead`/`ShortWrite` and are never retried.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{DocboxError, IoContext, Result};
use crate::layout::{decode_directory, encode_directory, DocumentEntry, Superblock, SUPERBLOCK_SIZE};

pub(crate) fn open_read(path: &Path) -> Result<File> {
    File::open(path).at("open", path)
}

pub(crate) fn open_read_write(path: &Path) -> Result<File> {
    OpenOptions::new().read(true).write(true).open(path).at("open", path)
}

/// Fill `buf` completely or fail with `ShortRead`
pub(crate) fn read_full<R: Read>(reader: &mut R, buf: &mut [u8], what: &'static str) -> Result<()> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => {
                return Err(DocboxError::ShortRead {
                    what,
                    expected: buf.len() as u64,
                    actual: filled as u64,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Write all of `buf` or fail with `ShortWrite`
pub(crate) fn write_full<W: Write>(writer: &mut W, buf: &[u8], what: &'static str) -> Result<()> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => {
                return Err(DocboxError::ShortWrite {
                    what,
                    expected: buf.len() as u64,
                    actual: written as u64,
                })
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

pub(crate) fn read_superblock(file: &mut File) -> Result<Superblock> {
    let file_len = file.metadata()?.len();
    if file_len < SUPERBLOCK_SIZE as u64 {
        return Err(DocboxError::CorruptHeader(format!(
            "file is {} bytes, smaller than the superblock",
            file_len
        )));
    }

    let mut header = [0u8; SUPERBLOCK_SIZE];
    file.seek(SeekFrom::Start(0))?;
    read_full(file, &mut header, "superblock")?;

    let superblock = Superblock::decode(&header)?;
    superblock.check_against(file_len)?;
    Ok(superblock)
}

pub(crate) fn write_superblock(file: &mut File, superblock: &Superblock) -> Result<()> {
    file.seek(SeekFrom::Start(0))?;
    write_full(file, &superblock.encode(), "superblock")
}

/// Read the directory a superblock points at and check every extent against
/// the file length.
pub(crate) fn read_directory(file: &mut File, superblock: &Superblock) -> Result<Vec<DocumentEntry>> {
    if superblock.count == 0 {
        return Ok(Vec::new());
    }

    let mut bytes = vec![0u8; superblock.directory_len() as usize];
    file.seek(SeekFrom::Start(superblock.directory_offset))?;
    read_full(file, &mut bytes, "directory")?;

    let entries = decode_directory(&bytes, superblock.count as usize)?;

    let file_len = file.metadata()?.len();
    for entry in &entries {
        if entry.offset < SUPERBLOCK_SIZE as u64 || entry.offset.checked_add(entry.size).map_or(true, |end| end > file_len) {
            return Err(DocboxError::CorruptDirectory(format!(
                "'{}' spans [{}, {}) outside the payload region of a {} byte file",
                entry.name,
                entry.offset,
                entry.end(),
                file_len
            )));
        }
    }

    debug!(
        count = entries.len(),
        directory_offset = superblock.directory_offset,
        "directory loaded"
    );
    Ok(entries)
}

/// Write `entries` as one contiguous run starting at `offset`
pub(crate) fn write_directory_at(file: &mut File, offset: u64, entries: &[DocumentEntry]) -> Result<()> {
    let bytes = encode_directory(entries)?;
    file.seek(SeekFrom::Start(offset))?;
    write_full(file, &bytes, "directory")
}

/// Copy `source` to the current position of `file` in `chunk_size` pieces.
/// Returns the number of bytes copied. Read failures name `source_path`.
pub(crate) fn append_stream<R: Read>(file: &mut File, source: &mut R, source_path: &Path, chunk_size: usize) -> Result<u64> {
    let mut buffer = vec![0u8; chunk_size];
    let mut copied = 0u64;

    loop {
        let n = match source.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(DocboxError::Io(e).at("read source", source_path)),
        };
        write_full(file, &buffer[..n], "payload")?;
        copied += n as u64;
    }

    Ok(copied)
}
