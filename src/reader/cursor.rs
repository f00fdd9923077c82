//! Viewer cursor
//!
//! Pure paging state over one document. The interactive loop (reading keys,
//! printing pages) belongs to the caller; this type only decides where the
//! next page starts.

/// Command issued by the pager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    Next,
    Prev,
    Stop,
}

/// Outcome of applying a `ViewCommand`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    /// Position changed
    Moved,
    /// `Next` on the last page, position unchanged
    AtLastBlock,
    /// `Prev` on the first page, position unchanged
    AtFirstBlock,
    /// `Stop` was issued; further commands are ignored
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCursor {
    size: u64,
    block_size: u64,
    position: u64,
    stopped: bool,
}

impl ViewCursor {
    /// Cursor at the start of a `size`-byte document. A zero `block_size`
    /// is treated as 1.
    pub fn new(size: u64, block_size: usize) -> Self {
        Self {
            size,
            block_size: block_size.max(1) as u64,
            position: 0,
            stopped: false,
        }
    }

    pub fn apply(&mut self, command: ViewCommand) -> CursorMove {
        if self.stopped {
            return CursorMove::Stopped;
        }

        match command {
            ViewCommand::Next => {
                if self.position + self.block_size < self.size {
                    self.position += self.block_size;
                    CursorMove::Moved
                } else {
                    CursorMove::AtLastBlock
                }
            }
            ViewCommand::Prev => {
                if self.position >= self.block_size {
                    self.position -= self.block_size;
                    CursorMove::Moved
                } else {
                    CursorMove::AtFirstBlock
                }
            }
            ViewCommand::Stop => {
                self.stopped = true;
                CursorMove::Stopped
            }
        }
    }

    /// Offset within the document of the current page
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes to request for the current page
    pub fn block_size(&self) -> usize {
        self.block_size as usize
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
