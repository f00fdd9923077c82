//! Configuration for docbox
//!
//! Centralized configuration with sensible defaults.

use crate::error::{DocboxError, Result};

/// Default copy buffer used when appending a source file (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Default number of bytes shown per page by the viewer
pub const DEFAULT_VIEW_BLOCK_SIZE: usize = 512;

/// Runtime configuration for a container handle
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // I/O Configuration
    // -------------------------------------------------------------------------
    /// Buffer size used to stream a source file into the container.
    /// Not part of the file format; any value yields the same bytes on disk.
    pub chunk_size: usize,

    /// fsync after the directory write and again after the superblock write
    pub sync_writes: bool,

    /// Take fs2 advisory locks (exclusive for mutations, shared for reads)
    pub lock_files: bool,

    // -------------------------------------------------------------------------
    // Viewer Configuration
    // -------------------------------------------------------------------------
    /// Page size used by `ViewCursor`
    pub view_block_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            sync_writes: true,
            lock_files: true,
            view_block_size: DEFAULT_VIEW_BLOCK_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the invariants `build` enforces
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DocboxError::Config("chunk_size must be greater than 0".to_string()));
        }
        if self.view_block_size == 0 {
            return Err(DocboxError::Config(
                "view_block_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the copy buffer size (in bytes)
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.config.chunk_size = size;
        self
    }

    /// Enable or disable fsync on metadata writes
    pub fn sync_writes(mut self, sync: bool) -> Self {
        self.config.sync_writes = sync;
        self
    }

    /// Enable or disable advisory file locking
    pub fn lock_files(mut self, lock: bool) -> Self {
        self.config.lock_files = lock;
        self
    }

    /// Set the viewer page size (in bytes)
    pub fn view_block_size(mut self, size: usize) -> Self {
        self.config.view_block_size = size;
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
