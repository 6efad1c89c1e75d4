use super::*;

#[test]
fn test_point_is_empty() {
    let span = Span::point(4);
    assert!(span.is_empty());
    assert_eq!(span.len(), 0);
    assert_eq!(span, Span::new(4, 4));
}

#[test]
fn test_merge_covers_both() {
    let merged = Span::new(2, 5).merge(Span::new(0, 3));
    assert_eq!(merged, Span::new(0, 5));
}

#[test]
fn test_contains_is_half_open() {
    let span = Span::new(1, 3);
    assert!(!span.contains(0));
    assert!(span.contains(1));
    assert!(span.contains(2));
    assert!(!span.contains(3));
}

#[test]
fn test_try_from_range_rejects_overflow() {
    let too_big = u32::MAX as usize + 1;
    assert_eq!(
        Span::try_from_range(0..too_big),
        Err(SpanError::EndTooLarge(too_big))
    );
    assert_eq!(Span::try_from_range(2..7), Ok(Span::new(2, 7)));
}

#[test]
fn test_debug_is_compact() {
    assert_eq!(format!("{:?}", Span::new(3, 9)), "3..9");
}
