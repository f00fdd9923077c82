//! Container handle
//!
//! Binds a path to its in-memory directory for the lifetime of a session.
//! Every operation opens the file, does its work and closes it again; no
//! handle is held between calls.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::directory::Directory;
use crate::error::{DocboxError, IoContext, Result};
use crate::layout::{validate_name, DocumentEntry, Superblock};
use crate::ordering::Criterion;
use crate::reader;

use super::file::{append_stream, open_read, open_read_write, read_directory, read_superblock, write_directory_at, write_superblock};
use super::lock::LockedFile;
use super::integrity::{self, VerifyReport};

/// An open document container
///
/// ## Ownership
/// The directory is owned exclusively by the handle and released by
/// `close` (or drop). Two handles on the same path do not see each other's
/// changes until reopened.
#[derive(Debug)]
pub struct Container {
    /// Container file this handle is bound to
    path: PathBuf,

    /// In-memory copy of the most recently loaded or written directory
    directory: Directory,

    /// Handle configuration
    config: Config,
}

impl Container {
    /// Create (or truncate) a container at `path` with default config
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_with_config(path, Config::default())
    }

    /// Create (or truncate) a container at `path`
    ///
    /// Writes an empty superblock: `count = 0`, directory right after the
    /// header.
    pub fn create_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        config.validate()?;
        let path = path.as_ref().to_path_buf();

        // Truncate only once the lock is held
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .at("create", &path)?;
        let mut file = LockedFile::exclusive(file, &path, config.lock_files)?;

        file.set_len(0).at("truncate", &path)?;
        write_superblock(&mut file, &Superblock::empty()).at("write superblock", &path)?;
        if config.sync_writes {
            file.sync_all().at("sync", &path)?;
        }

        info!(path = %path.display(), "container created");

        Ok(Self {
            path,
            directory: Directory::new(),
            config,
        })
    }

    /// Open a container with default config, creating it if missing
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Open a container, creating it if missing
    ///
    /// Loads the superblock and, when `count > 0`, exactly `count` entries
    /// from `directory_offset`.
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        config.validate()?;
        let path = path.as_ref().to_path_buf();

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "container not found, creating a new one");
                return Self::create_with_config(path, config);
            }
            Err(e) => return Err(DocboxError::Io(e).at("open", &path)),
        };
        let mut file = LockedFile::shared(file, &path, config.lock_files)?;

        let superblock = read_superblock(&mut file).at("read superblock", &path)?;
        let entries = read_directory(&mut file, &superblock).at("read directory", &path)?;
        let directory = Directory::from_entries(entries)?;

        debug!(path = %path.display(), count = directory.count(), "container opened");

        Ok(Self {
            path,
            directory,
            config,
        })
    }

    /// Add `source_path` under `doc_name`, or replace the payload of an
    /// existing `doc_name`
    ///
    /// Steps:
    /// 1. Open the source (`SourceNotFound` on failure)
    /// 2. Lock the container and re-read its superblock
    /// 3. Append the source bytes at end of file
    /// 4. Insert or update the in-memory entry
    /// 5. Persist directory + superblock (`MetadataPersistFailed` on failure)
    ///
    /// A replaced payload stays in the file, unreferenced.
    pub fn add(&mut self, source_path: impl AsRef<Path>, doc_name: &str) -> Result<DocumentEntry> {
        validate_name(doc_name)?;
        let source_path = source_path.as_ref();

        let source_not_found = |source| DocboxError::SourceNotFound {
            path: source_path.to_path_buf(),
            source,
        };
        let mut source = File::open(source_path).map_err(source_not_found)?;
        let expected = source.metadata().map_err(source_not_found)?.len();

        let mut file = self.open_for_update()?;
        read_superblock(&mut file).at("read superblock", &self.path)?;

        // Step 3: payload append. Failures here leave the directory untouched.
        let offset = file.seek(SeekFrom::End(0)).at("seek", &self.path)?;
        let size = append_stream(&mut file, &mut source, source_path, self.config.chunk_size).at("append payload", &self.path)?;
        if size != expected {
            warn!(
                source = %source_path.display(),
                expected,
                copied = size,
                "source length changed while copying"
            );
        }

        // Step 4: in-memory directory
        let inserted_at = unix_now();
        let entry = match self.directory.find(doc_name) {
            Some(index) => {
                debug!(name = doc_name, index, "replacing existing document");
                self.directory.replace_at(index, size, inserted_at, offset)?.clone()
            }
            None => {
                let entry = DocumentEntry::new(doc_name, size, inserted_at, offset);
                self.directory.insert(entry.clone())?;
                entry
            }
        };

        // Step 5: metadata
        self.persist_into(&mut file)
            .map_err(|e| self.persist_failed(e))?;

        info!(
            path = %self.path.display(),
            name = doc_name,
            offset,
            size,
            "document added"
        );
        Ok(entry)
    }

    /// Remove `doc_name` from the directory and persist
    ///
    /// The payload bytes stay in the file. Other entries keep their
    /// relative order.
    pub fn remove(&mut self, doc_name: &str) -> Result<DocumentEntry> {
        let removed = self.directory.remove(doc_name)?;

        self.persist().map_err(|e| self.persist_failed(e))?;

        info!(path = %self.path.display(), name = doc_name, "document removed");
        Ok(removed)
    }

    /// Reorder the directory by `criterion` and persist
    ///
    /// Fewer than two entries is a successful no-op. Payloads and offsets
    /// are untouched.
    pub fn order(&mut self, criterion: Criterion) -> Result<()> {
        if self.directory.count() < 2 {
            debug!(count = self.directory.count(), "nothing to order");
            return Ok(());
        }

        self.directory.sort_by(criterion);
        self.persist().map_err(|e| self.persist_failed(e))?;

        info!(path = %self.path.display(), %criterion, "directory reordered");
        Ok(())
    }

    /// `order` with the criterion given as a keyword (`name`, `date`, `size`)
    ///
    /// The entry count is checked first, so with fewer than two entries any
    /// keyword succeeds without being parsed.
    pub fn order_by(&mut self, keyword: &str) -> Result<()> {
        if self.directory.count() < 2 {
            debug!(count = self.directory.count(), keyword, "nothing to order");
            return Ok(());
        }
        self.order(keyword.parse()?)
    }

    /// Write the in-memory directory and a matching superblock to disk
    ///
    /// Called by every mutation; public so a caller can retry after
    /// `MetadataPersistFailed`.
    pub fn persist(&self) -> Result<()> {
        let mut file = self.open_for_update()?;
        self.persist_into(&mut file)
    }

    /// Read up to `max_bytes` of `doc_name` starting at `offset` within the
    /// document
    pub fn read_range(&self, doc_name: &str, offset: u64, max_bytes: usize) -> Result<Vec<u8>> {
        let entry = self.directory.lookup(doc_name)?;
        let file = open_read(&self.path)?;
        let mut file = LockedFile::shared(file, &self.path, self.config.lock_files)?;
        reader::read_range_from(&mut file, entry, offset, max_bytes).at("read payload", &self.path)
    }

    /// Integrity report for the file this handle is bound to
    pub fn verify(&self) -> Result<VerifyReport> {
        integrity::verify_with_config(&self.path, &self.config)
    }

    /// Release the in-memory directory
    pub fn close(self) {
        debug!(path = %self.path.display(), count = self.directory.count(), "container closed");
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Entry named `doc_name`, if present
    pub fn get(&self, doc_name: &str) -> Option<&DocumentEntry> {
        self.directory.find(doc_name).and_then(|i| self.directory.get(i))
    }

    /// Entries in current directory order
    pub fn list(&self) -> &[DocumentEntry] {
        self.directory.entries()
    }

    pub fn len(&self) -> usize {
        self.directory.count()
    }

    pub fn is_empty(&self) -> bool {
        self.directory.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn open_for_update(&self) -> Result<LockedFile> {
        let file = open_read_write(&self.path)?;
        LockedFile::exclusive(file, &self.path, self.config.lock_files)
    }

    /// Relocate the directory to end of file, then point the superblock at it
    fn persist_into(&self, file: &mut File) -> Result<()> {
        let directory_offset = file.seek(SeekFrom::End(0)).at("seek", &self.path)?;

        write_directory_at(file, directory_offset, self.directory.entries()).at("write directory", &self.path)?;
        if self.config.sync_writes {
            file.sync_data().at("sync", &self.path)?;
        }

        let superblock = Superblock {
            count: self.directory.count() as u32,
            directory_offset,
        };
        write_superblock(file, &superblock).at("write superblock", &self.path)?;
        if self.config.sync_writes {
            file.sync_data().at("sync", &self.path)?;
        }

        debug!(
            path = %self.path.display(),
            count = superblock.count,
            directory_offset,
            "metadata persisted"
        );
        Ok(())
    }

    fn persist_failed(&self, source: DocboxError) -> DocboxError {
        warn!(path = %self.path.display(), error = %source, "metadata persist failed");
        DocboxError::MetadataPersistFailed {
            path: self.path.clone(),
            source: Box::new(source),
        }
    }
}

/// Current time in unix seconds
fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
