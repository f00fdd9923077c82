//! Tests for listing rows and table rendering

use docbox::listing::{format_timestamp, render_table, rows, ListingRow};
use docbox::DocumentEntry;

#[test]
fn test_rows_follow_directory_order() {
    let entries = vec![
        DocumentEntry::new("b.txt", 20, 0, 302),
        DocumentEntry::new("a.txt", 10, 0, 12),
    ];

    let listed = rows(&entries);

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "b.txt");
    assert_eq!(listed[0].size, 20);
    assert_eq!(listed[0].offset, 302);
    assert_eq!(listed[1].name, "a.txt");
}

#[test]
fn test_timestamp_format_shape() {
    let formatted = format_timestamp(1_700_000_000);

    // YYYY-MM-DD HH:MM:SS in local time
    assert_eq!(formatted.len(), 19);
    assert_eq!(&formatted[4..5], "-");
    assert_eq!(&formatted[10..11], " ");
    assert!(formatted.starts_with("2023-11-1"));
}

#[test]
fn test_timestamp_out_of_range_is_raw() {
    assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
}

#[test]
fn test_render_empty() {
    assert_eq!(render_table(&[]), "container is empty\n");
}

#[test]
fn test_render_table_contains_rows() {
    let table = render_table(&[ListingRow {
        name: "notes.md".to_string(),
        size: 1234,
        inserted_at: "2024-01-02 03:04:05".to_string(),
        offset: 12,
    }]);

    assert!(table.starts_with("1 document(s)\n"));
    assert!(table.contains("NAME"));
    assert!(table.contains("notes.md"));
    assert!(table.contains("1234"));
    assert!(table.contains("2024-01-02 03:04:05"));
}

#[test]
fn test_render_table_layout() {
    let row = |name: &str, offset| ListingRow {
        name: name.to_string(),
        size: 7,
        inserted_at: "2024-01-02 03:04:05".to_string(),
        offset,
    };
    let table = render_table(&[row("a", 12), row("b", 19)]);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "2 document(s)");
    assert!(lines[1].starts_with("NAME"));
    assert_eq!(lines[2], "-".repeat(82));
    assert!(lines[3].starts_with("a "));
    assert!(lines[3].ends_with("        12"));
    assert!(lines[4].starts_with("b "));
    assert_eq!(lines[5], lines[2]);
    assert_eq!(lines[1].find('|'), lines[3].find('|'));
    assert!(table.ends_with('\n'));
}

#[test]
fn test_rows_serialize_to_json() {
    let listed = rows(&[DocumentEntry::new("a", 1, 0, 12)]);
    let json = serde_json::to_value(&listed).unwrap();

    assert_eq!(json[0]["name"], "a");
    assert_eq!(json[0]["size"], 1);
    assert_eq!(json[0]["offset"], 12);
}
