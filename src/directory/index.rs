//! Directory implementation

use crate::error::{DocboxError, Result};
use crate::layout::{validate_name, DocumentEntry};
use crate::ordering::Criterion;

/// Largest entry count the superblock's i32 count can describe
pub const MAX_ENTRIES: usize = i32::MAX as usize;

/// Ordered document metadata, exclusively owned by a container handle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: Vec<DocumentEntry>,
}

impl Directory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from decoded entries, rejecting invalid or repeated
    /// names.
    pub fn from_entries(entries: Vec<DocumentEntry>) -> Result<Self> {
        let mut directory = Self {
            entries: Vec::with_capacity(entries.len()),
        };

        for entry in entries {
            directory.insert(entry).map_err(|e| match e {
                DocboxError::DuplicateName { name } => {
                    DocboxError::CorruptDirectory(format!("name '{}' appears twice", name))
                }
                DocboxError::InvalidName { name, reason } => {
                    DocboxError::CorruptDirectory(format!("{:?}: {}", name, reason))
                }
                other => other,
            })?;
        }

        Ok(directory)
    }

    /// Index of the entry named `name`, if any
    pub fn find(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Entry named `name`, or `NotFound`
    pub fn lookup(&self, name: &str) -> Result<&DocumentEntry> {
        self.find(name)
            .map(|i| &self.entries[i])
            .ok_or_else(|| DocboxError::NotFound {
                name: name.to_string(),
            })
    }

    pub fn get(&self, index: usize) -> Option<&DocumentEntry> {
        self.entries.get(index)
    }

    /// Append a new entry at the end of the iteration order
    pub fn insert(&mut self, entry: DocumentEntry) -> Result<usize> {
        validate_name(&entry.name)?;

        if self.find(&entry.name).is_some() {
            return Err(DocboxError::DuplicateName { name: entry.name });
        }
        if self.entries.len() >= MAX_ENTRIES {
            return Err(DocboxError::DirectoryFull);
        }

        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    /// Overwrite the payload fields of the entry at `index`. The name and the
    /// entry's position are kept.
    pub fn replace_at(&mut self, index: usize, size: u64, inserted_at: i64, offset: u64) -> Result<&DocumentEntry> {
        let len = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or_else(|| {
            DocboxError::CorruptDirectory(format!("index {} out of bounds ({} entries)", index, len))
        })?;

        entry.size = size;
        entry.inserted_at = inserted_at;
        entry.offset = offset;
        Ok(entry)
    }

    /// Remove the entry at `index`, shifting later entries down by one
    pub fn remove_at(&mut self, index: usize) -> Option<DocumentEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Remove the entry named `name`
    pub fn remove(&mut self, name: &str) -> Result<DocumentEntry> {
        let index = self.find(name).ok_or_else(|| DocboxError::NotFound {
            name: name.to_string(),
        })?;
        // find just returned a valid index
        Ok(self.entries.remove(index))
    }

    /// Stable sort by `criterion`
    pub fn sort_by(&mut self, criterion: Criterion) {
        self.entries.sort_by(|a, b| criterion.compare(a, b));
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Directory {
    type Item = &'a DocumentEntry;
    type IntoIter = std::slice::Iter<'a, DocumentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
