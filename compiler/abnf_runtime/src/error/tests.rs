use super::*;
use pretty_assertions::assert_eq;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_unexpected_char_single_expectation() {
    let err = SyntaxError::unexpected(4, Some('x'), names(&["DIGIT"]));
    assert_eq!(err.code, ErrorCode::E1001);
    assert_eq!(err.message, "expected `DIGIT`, found 'x'");
    assert_eq!(err.span, Span::new(4, 5));
    assert_eq!(err.position(), 4);
}

#[test]
fn test_unexpected_char_lists_alternatives() {
    let err = SyntaxError::unexpected(0, Some('?'), names(&["'$batch'", "'$metadata'"]));
    assert_eq!(err.message, "expected `'$batch'` or `'$metadata'`, found '?'");

    let err = SyntaxError::unexpected(0, Some('?'), names(&["a", "b", "c"]));
    assert_eq!(err.message, "expected one of `a`, `b`, `c`, found '?'");
}

#[test]
fn test_unexpected_without_expectations() {
    let err = SyntaxError::unexpected(2, Some('!'), Vec::new());
    assert_eq!(err.message, "unexpected '!'");
}

#[test]
fn test_unexpected_end_of_input() {
    let err = SyntaxError::unexpected(3, None, names(&["CLOSE"]));
    assert_eq!(err.code, ErrorCode::E1002);
    assert_eq!(err.message, "unexpected end of input, expected `CLOSE`");
    assert_eq!(err.span, Span::point(3));
}

#[test]
fn test_trailing_covers_rest_of_input() {
    let err = SyntaxError::trailing(2, 5, Some('z'));
    assert_eq!(err.code, ErrorCode::E1003);
    assert_eq!(err.span, Span::new(2, 5));
    assert!(err.expected.is_empty());
}

#[test]
fn test_display_includes_code_and_span() {
    let err = SyntaxError::unexpected(1, Some('x'), names(&["EQ"]));
    assert_eq!(err.to_string(), "[E1001] expected `EQ`, found 'x' at 1..2");
}

#[test]
fn test_to_diagnostic_renders_against_source() {
    let err = SyntaxError::unexpected(5, Some('x'), names(&["DIGIT"]));
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.primary_span(), Some(Span::new(5, 6)));
    assert_eq!(
        diag.render("$top=x"),
        "error [E1001]: expected `DIGIT`, found 'x'\n  --> 1:6: unexpected 'x'\n   | $top=x\n   |      ^"
    );
}

#[test]
fn test_to_diagnostic_notes_multiple_expectations() {
    let err = SyntaxError::unexpected(0, None, names(&["a", "b"]));
    let diag = err.to_diagnostic();
    assert_eq!(diag.notes, vec!["any of 2 would continue the match".to_string()]);
}
