//! Ordering Policy
//!
//! Comparison strategies applied to the directory. All three are total
//! orders over entries, so `slice::sort_by` (stable) keeps the previous
//! relative order of ties.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::DocboxError;
use crate::layout::DocumentEntry;

/// Sort key for `Container::order`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    /// Lexicographic on the name's bytes
    Name,
    /// Ascending `inserted_at`
    Date,
    /// Ascending payload size
    Size,
}

impl Criterion {
    pub const ALL: [Criterion; 3] = [Criterion::Name, Criterion::Date, Criterion::Size];

    pub fn compare(&self, a: &DocumentEntry, b: &DocumentEntry) -> Ordering {
        match self {
            Criterion::Name => a.name.as_bytes().cmp(b.name.as_bytes()),
            Criterion::Date => a.inserted_at.cmp(&b.inserted_at),
            Criterion::Size => a.size.cmp(&b.size),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Name => "name",
            Criterion::Date => "date",
            Criterion::Size => "size",
        }
    }
}

impl FromStr for Criterion {
    type Err = DocboxError;

    /// Accepts `name`/`date`/`size` and the legacy `nome`/`data`/`tamanho`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" | "nome" => Ok(Criterion::Name),
            "date" | "data" => Ok(Criterion::Date),
            "size" | "tamanho" => Ok(Criterion::Size),
            other => Err(DocboxError::InvalidCriterion(other.to_string())),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
