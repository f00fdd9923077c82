//! Content Reader Module
//!
//! Random-access reads inside one document's stored extent, and the cursor
//! state an external pager drives on top of them.

mod cursor;
mod range;

pub use cursor::{CursorMove, ViewCommand, ViewCursor};
pub use range::read_range;

pub(crate) use range::read_range_from;
