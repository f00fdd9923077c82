//! # docbox
//!
//! A single-file document container with:
//! - A fixed-size superblock at offset 0
//! - An append-only payload region
//! - An in-file directory, rewritten after every mutation
//! - Insert-or-replace, removal and reordering of documents
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    docbox CLI / callers                      │
//! │             (listing, interactive viewer)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Container Store                            │
//! │      (open-modify-close per operation, advisory locks)       │
//! └──────────┬──────────────────────┬───────────────────────────┘
//!            │                      │
//!            ▼                      ▼
//!   ┌─────────────────┐    ┌─────────────────┐
//!   │ Directory Index │    │ Content Reader  │
//!   │   (in memory)   │    │  (byte ranges)  │
//!   └────────┬────────┘    └─────────────────┘
//!            │
//!            ▼
//!   ┌─────────────────┐    ┌─────────────────┐
//!   │ Ordering Policy │    │  Binary Layout  │
//!   └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Known Limitations
//! - Removed and replaced payloads are never reclaimed; the file only grows.
//! - Advisory locks keep cooperating processes apart, nothing more.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod layout;
pub mod directory;
pub mod ordering;
pub mod store;
pub mod reader;
pub mod listing;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DocboxError, Result};
pub use config::Config;
pub use layout::{DocumentEntry, Superblock};
pub use directory::Directory;
pub use ordering::Criterion;
pub use store::{verify, Container, VerifyReport};
pub use reader::{read_range, CursorMove, ViewCommand, ViewCursor};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of docbox
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
