//! Error types for docbox
//!
//! Provides a unified error type for all container operations.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using DocboxError
pub type Result<T> = std::result::Result<T, DocboxError>;

/// Unified error type for docbox operations
#[derive(Debug, Error)]
pub enum DocboxError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO error during {op} on {}: {source}", path.display())]
    IoAt {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Short read on {what}: expected {expected} bytes, got {actual}")]
    ShortRead {
        what: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("Short write on {what}: expected {expected} bytes, wrote {actual}")]
    ShortWrite {
        what: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("Container {} is locked by another process", path.display())]
    Locked { path: PathBuf },

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    #[error("Corrupt superblock: {0}")]
    CorruptHeader(String),

    #[error("Corrupt directory: {0}")]
    CorruptDirectory(String),

    // -------------------------------------------------------------------------
    // Directory Errors
    // -------------------------------------------------------------------------
    #[error("Document '{name}' not found")]
    NotFound { name: String },

    #[error("Document '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Invalid document name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Directory is full")]
    DirectoryFull,

    #[error("Invalid ordering criterion '{0}' (use name, date or size)")]
    InvalidCriterion(String),

    // -------------------------------------------------------------------------
    // Container Errors
    // -------------------------------------------------------------------------
    #[error("Source file {} cannot be opened: {source}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Offset {offset} is past the end of '{name}' ({size} bytes)")]
    OutOfRange { name: String, offset: u64, size: u64 },

    /// Payload bytes (if any) are in the file and the in-memory directory is
    /// already updated, but the on-disk directory does not reference them yet.
    #[error("Failed to persist metadata of {}: {source}", path.display())]
    MetadataPersistFailed {
        path: PathBuf,
        #[source]
        source: Box<DocboxError>,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DocboxError {
    /// Attach the operation and file to a bare `Io` error. Other variants
    /// already carry their own context and are returned unchanged.
    pub(crate) fn at(self, op: &'static str, path: &Path) -> Self {
        match self {
            DocboxError::Io(source) => DocboxError::IoAt {
                op,
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }

    /// Underlying OS error, if this is an I/O failure
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            DocboxError::Io(e) | DocboxError::IoAt { source: e, .. } => Some(e),
            _ => None,
        }
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocboxError::NotFound { .. })
    }

    /// True when the in-memory directory is ahead of the file and a retry of
    /// `Container::persist` may be attempted.
    pub fn is_metadata_persist_failure(&self) -> bool {
        matches!(self, DocboxError::MetadataPersistFailed { .. })
    }
}

/// Adds `op` + path context to I/O results
pub(crate) trait IoContext<T> {
    fn at(self, op: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn at(self, op: &'static str, path: &Path) -> Result<T> {
        self.map_err(|e| DocboxError::Io(e).at(op, path))
    }
}

impl<T> IoContext<T> for Result<T> {
    fn at(self, op: &'static str, path: &Path) -> Result<T> {
        self.map_err(|e| e.at(op, path))
    }
}
