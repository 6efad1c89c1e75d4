use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("test error")
        .with_label(Span::new(0, 5), "here")
        .with_note("some context")
        .with_suggestion("try this");

    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "test error");
    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn test_primary_span_skips_secondary_labels() {
    let diag = Diagnostic::error(ErrorCode::E9003)
        .with_secondary_label(Span::new(0, 1), "first referenced here")
        .with_label(Span::new(4, 6), "cycle closes here");

    assert_eq!(diag.primary_span(), Some(Span::new(4, 6)));
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("test error")
        .with_label(Span::new(0, 5), "here");

    let output = diag.to_string();
    assert!(output.contains("error"));
    assert!(output.contains("E1001"));
    assert!(output.contains("test error"));
    assert!(output.contains("0..5"));
}

#[test]
fn test_render_underlines_primary_label() {
    let source = "$top=1\n$skip=x";
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("expected DIGIT, found `x`")
        .with_label(Span::new(13, 14), "expected DIGIT")
        .with_suggestion("use a non-negative integer");

    let expected = "\
error [E1001]: expected DIGIT, found `x`
  --> 2:7: expected DIGIT
   | $skip=x
   |       ^
  = help: use a non-negative integer";

    assert_eq!(diag.render(source), expected);
}

#[test]
fn test_render_empty_span_gets_one_caret() {
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("unexpected end of input")
        .with_label(Span::point(3), "input ends here");

    let rendered = diag.render("abc");
    assert!(rendered.ends_with("   | abc\n   |    ^"), "{rendered}");
}
