//! Listing
//!
//! Turns the directory into display rows for `docbox list`.

use std::fmt::Display;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::layout::DocumentEntry;

/// Timestamp format used in listings
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One listed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub name: String,
    pub size: u64,
    pub inserted_at: String,
    pub offset: u64,
}

impl ListingRow {
    pub fn from_entry(entry: &DocumentEntry) -> Self {
        Self {
            name: entry.name.clone(),
            size: entry.size,
            inserted_at: format_timestamp(entry.inserted_at),
            offset: entry.offset,
        }
    }
}

/// Rows in the order the entries are given (directory order)
pub fn rows<'a>(entries: impl IntoIterator<Item = &'a DocumentEntry>) -> Vec<ListingRow> {
    entries.into_iter().map(ListingRow::from_entry).collect()
}

/// Local-time rendering of unix seconds; out-of-range values are shown raw
pub fn format_timestamp(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(utc) => utc.with_timezone(&Local).format(DATE_FORMAT).to_string(),
        None => secs.to_string(),
    }
}

/// Human-readable table
pub fn render_table(rows: &[ListingRow]) -> String {
    if rows.is_empty() {
        return "container is empty\n".to_string();
    }

    let rule = "-".repeat(82);
    let mut out = format!("{} document(s)\n", rows.len());

    out.push_str(&table_line("NAME", "SIZE (B)", "INSERTED", "OFFSET"));
    out.push_str(&rule);
    out.push('\n');
    for row in rows {
        out.push_str(&table_line(&row.name, row.size, &row.inserted_at, row.offset));
    }
    out.push_str(&rule);
    out.push('\n');

    out
}

fn table_line(name: impl Display, size: impl Display, inserted: impl Display, offset: impl Display) -> String {
    format!("{:<30} | {:>12} | {:<20} | {:>10}\n", name, size, inserted, offset)
}
