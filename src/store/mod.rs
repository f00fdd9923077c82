//! Container Store Module
//!
//! Owns all file I/O on a container.
//!
//! ## Responsibilities
//! - Create a container and load its header + directory
//! - Stream source files into the append-only payload region
//! - Rewrite directory + superblock after every mutation
//! - Advisory locking around each open-modify-close cycle
//!
//! ## Persist Protocol
//! ```text
//! 1. seek to end of file
//! 2. write count × entry at that offset        (new directory)
//! 3. fsync                                      (if sync_writes)
//! 4. write superblock {count, offset} at 0
//! 5. fsync                                      (if sync_writes)
//! ```
//! A crash before step 4 leaves the old superblock pointing at the old,
//! untouched directory. A crash after a payload append but before step 4
//! leaves unreferenced payload bytes behind, nothing else.
//!
//! Space held by removed or replaced payloads and by old directories is
//! never reclaimed.

mod container;
mod file;
mod lock;
mod integrity;

pub use container::Container;
pub use integrity::{verify, VerifyReport};

pub(crate) use file::{open_read, read_full};
