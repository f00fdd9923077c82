//! Advisory file locks
//!
//! Whole-file fs2 locks held for one open-modify-close cycle. Locks never
//! block: a contended lock is reported as `Locked`.

use std::fs::File;
use std::ops::{Deref, DerefMut};
use std::path::Path;

use fs2::FileExt;

use crate::error::{DocboxError, Result};

/// A container file handle, optionally holding an advisory lock that is
/// released on drop.
#[derive(Debug)]
pub(crate) struct LockedFile {
    file: File,
    locked: bool,
}

impl LockedFile {
    /// Shared lock, used by readers
    pub(crate) fn shared(file: File, path: &Path, enabled: bool) -> Result<Self> {
        if enabled {
            FileExt::try_lock_shared(&file).map_err(|e| contended(e, path, "shared lock"))?;
        }
        Ok(Self { file, locked: enabled })
    }

    /// Exclusive lock, used by every mutating operation
    pub(crate) fn exclusive(file: File, path: &Path, enabled: bool) -> Result<Self> {
        if enabled {
            FileExt::try_lock_exclusive(&file).map_err(|e| contended(e, path, "exclusive lock"))?;
        }
        Ok(Self { file, locked: enabled })
    }
}

fn contended(err: std::io::Error, path: &Path, op: &'static str) -> DocboxError {
    if err.kind() == fs2::lock_contended_error().kind() {
        DocboxError::Locked {
            path: path.to_path_buf(),
        }
    } else {
        DocboxError::IoAt {
            op,
            path: path.to_path_buf(),
            source: err,
        }
    }
}

impl Deref for LockedFile {
    type Target = File;

    fn deref(&self) -> &File {
        &self.file
    }
}

impl DerefMut for LockedFile {
    fn deref_mut(&mut self) -> &mut File {
        &mut self.file
    }
}

impl Drop for LockedFile {
    fn drop(&mut self) {
        if self.locked {
            let _ = FileExt::unlock(&self.file);
        }
    }
}
