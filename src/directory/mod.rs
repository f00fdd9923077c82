//! Directory Index Module
//!
//! In-memory, ordered list of document metadata. No I/O.
//!
//! ## Responsibilities
//! - Exact, case-sensitive lookup by name
//! - Keep names unique and valid at insert time
//! - Order-preserving removal
//! - Stable reordering by a `Criterion`
//!
//! ## Data Structure Choice
//! A plain `Vec` scanned linearly. Containers are expected to hold few
//! documents; past a few thousand entries a name → index map would be the
//! next step.

mod index;

pub use index::{Directory, MAX_ENTRIES};
