//! Tests for the content reader
//!
//! These tests verify:
//! - read_range bounds: partial pages, exact end, out of range
//! - Reads never leave the document's extent
//! - ViewCursor paging decisions

use std::fs;
use std::path::PathBuf;

use docbox::{read_range, Config, Container, CursorMove, DocboxError, DocumentEntry, ViewCommand, ViewCursor};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

/// Container holding "left" (26 letters) followed by "right" (10 digits)
fn setup_two_docs() -> (TempDir, PathBuf, Container) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("lib.bin");
    let left = temp_dir.path().join("left");
    let right = temp_dir.path().join("right");
    fs::write(&left, b"abcdefghijklmnopqrstuvwxyz").unwrap();
    fs::write(&right, b"0123456789").unwrap();

    let config = Config::builder().sync_writes(false).build().unwrap();
    let mut container = Container::create_with_config(&path, config).unwrap();
    container.add(&left, "left").unwrap();
    container.add(&right, "right").unwrap();
    (temp_dir, path, container)
}

// =============================================================================
// read_range Tests
// =============================================================================

#[test]
fn test_read_whole_document() {
    let (_temp, path, container) = setup_two_docs();
    let entry = container.get("left").unwrap();

    let bytes = read_range(&path, entry, 0, 1024).unwrap();
    assert_eq!(bytes, b"abcdefghijklmnopqrstuvwxyz");
}

#[test]
fn test_read_middle_page() {
    let (_temp, path, container) = setup_two_docs();
    let entry = container.get("left").unwrap();

    assert_eq!(read_range(&path, entry, 5, 3).unwrap(), b"fgh");
}

#[test]
fn test_read_is_clamped_to_document_end() {
    let (_temp, path, container) = setup_two_docs();
    let entry = container.get("right").unwrap();

    let bytes = read_range(&path, entry, 8, 100).unwrap();
    assert_eq!(bytes, b"89");
}

#[test]
fn test_read_never_crosses_into_next_document() {
    let (_temp, _path, container) = setup_two_docs();

    let bytes = container.read_range("left", 20, 4096).unwrap();
    assert_eq!(bytes, b"uvwxyz");
}

#[test]
fn test_read_at_exact_end_is_empty() {
    let (_temp, path, container) = setup_two_docs();
    let entry = container.get("right").unwrap();

    assert!(read_range(&path, entry, 10, 4).unwrap().is_empty());
}

#[test]
fn test_read_past_end_is_out_of_range() {
    let (_temp, path, container) = setup_two_docs();
    let entry = container.get("right").unwrap();

    let result = read_range(&path, entry, 11, 4);
    assert!(matches!(result, Err(DocboxError::OutOfRange { offset: 11, size: 10, .. })));
}

#[test]
fn test_read_zero_bytes() {
    let (_temp, path, container) = setup_two_docs();
    let entry = container.get("left").unwrap();

    assert!(read_range(&path, entry, 3, 0).unwrap().is_empty());
}

#[test]
fn test_read_unknown_name() {
    let (_temp, _path, container) = setup_two_docs();
    assert!(container.read_range("missing", 0, 1).unwrap_err().is_not_found());
}

#[test]
fn test_read_entry_beyond_file_is_short_read() {
    let (_temp, path, _container) = setup_two_docs();
    let len = fs::metadata(&path).unwrap().len();
    let bogus = DocumentEntry::new("bogus", 64, 0, len - 8);

    let result = read_range(&path, &bogus, 0, 64);
    assert!(matches!(result, Err(DocboxError::ShortRead { expected: 64, actual: 8, .. })));
}

#[test]
fn test_read_after_container_deleted_names_the_path() {
    let (_temp, path, container) = setup_two_docs();
    fs::remove_file(&path).unwrap();

    let err = container.read_range("left", 0, 4).unwrap_err();
    assert!(matches!(err, DocboxError::IoAt { op: "open", .. }));
    assert!(err.to_string().contains("lib.bin"));
}

// =============================================================================
// ViewCursor Tests
// =============================================================================

#[test]
fn test_cursor_pages_forward_and_back() {
    let mut cursor = ViewCursor::new(1200, 512);

    assert_eq!(cursor.position(), 0);
    assert_eq!(cursor.apply(ViewCommand::Next), CursorMove::Moved);
    assert_eq!(cursor.position(), 512);
    assert_eq!(cursor.apply(ViewCommand::Next), CursorMove::Moved);
    assert_eq!(cursor.position(), 1024);
    assert_eq!(cursor.apply(ViewCommand::Next), CursorMove::AtLastBlock);
    assert_eq!(cursor.position(), 1024);

    assert_eq!(cursor.apply(ViewCommand::Prev), CursorMove::Moved);
    assert_eq!(cursor.apply(ViewCommand::Prev), CursorMove::Moved);
    assert_eq!(cursor.apply(ViewCommand::Prev), CursorMove::AtFirstBlock);
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_cursor_exact_multiple_of_block() {
    let mut cursor = ViewCursor::new(1024, 512);

    assert_eq!(cursor.apply(ViewCommand::Next), CursorMove::Moved);
    assert_eq!(cursor.apply(ViewCommand::Next), CursorMove::AtLastBlock);
    assert_eq!(cursor.position(), 512);
}

#[test]
fn test_cursor_on_empty_document() {
    let mut cursor = ViewCursor::new(0, 512);

    assert_eq!(cursor.apply(ViewCommand::Next), CursorMove::AtLastBlock);
    assert_eq!(cursor.apply(ViewCommand::Prev), CursorMove::AtFirstBlock);
}

#[test]
fn test_cursor_stop_is_final() {
    let mut cursor = ViewCursor::new(4096, 512);

    assert_eq!(cursor.apply(ViewCommand::Stop), CursorMove::Stopped);
    assert!(cursor.is_stopped());
    assert_eq!(cursor.apply(ViewCommand::Next), CursorMove::Stopped);
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_cursor_drives_read_range() {
    let (_temp, _path, container) = setup_two_docs();
    let entry = container.get("left").unwrap();
    let mut cursor = ViewCursor::new(entry.size, 10);

    let mut pages = Vec::new();
    loop {
        pages.push(
            container
                .read_range("left", cursor.position(), cursor.block_size())
                .unwrap(),
        );
        if cursor.apply(ViewCommand::Next) != CursorMove::Moved {
            break;
        }
    }

    assert_eq!(pages, vec![b"abcdefghij".to_vec(), b"klmnopqrst".to_vec(), b"uvwxyz".to_vec()]);
}
