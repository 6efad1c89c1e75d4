use super::*;

#[test]
fn test_single_line() {
    let table = LineOffsetTable::build("$metadata");
    assert_eq!(table.line_count(), 1);
    assert_eq!(table.offset_to_line_col(0), (1, 1));
    assert_eq!(table.offset_to_line_col(9), (1, 10));
}

#[test]
fn test_offsets_count_characters_not_bytes() {
    // 'é' is two bytes in UTF-8 but one token for the cursor.
    let table = LineOffsetTable::build("é\nx");
    assert_eq!(table.line_start_offset(2), Some(2));
    assert_eq!(table.offset_to_line_col(2), (2, 1));
}

#[test]
fn test_line_text() {
    let source = "Products\n$top=2\n";
    let table = LineOffsetTable::build(source);
    assert_eq!(table.line_text(source, 2).as_deref(), Some("$top=2"));
    assert_eq!(table.line_text(source, 3).as_deref(), Some(""));
    assert_eq!(table.line_text(source, 4), None);
    assert_eq!(table.line_text(source, 0), None);
}

#[test]
fn test_span_line_col() {
    assert_eq!(span_line_col("a\nbc\nd", Span::new(3, 4)), (2, 2));
}
