//! Syntax errors for failed parses.

use std::fmt;

use abnf_diagnostic::{Diagnostic, ErrorCode, Span};

#[cfg(test)]
mod tests;

/// Why an input did not parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Where matching stopped.
    pub span: Span,
    /// Names of the rules that could have matched at `span`.
    pub expected: Vec<String>,
    /// The token at `span`, if any.
    pub found: Option<char>,
}

impl SyntaxError {
    /// Matching stopped at `pos`. `found` is `None` at the end of input.
    #[cold]
    pub fn unexpected(pos: usize, found: Option<char>, expected: Vec<String>) -> Self {
        let wanted = expected_list(&expected);
        let (code, message, span) = match found {
            Some(c) => (
                ErrorCode::E1001,
                match &wanted {
                    Some(wanted) => format!("expected {wanted}, found {c:?}"),
                    None => format!("unexpected {c:?}"),
                },
                Span::new(to_u32(pos), to_u32(pos + 1)),
            ),
            None => (
                ErrorCode::E1002,
                match &wanted {
                    Some(wanted) => format!("unexpected end of input, expected {wanted}"),
                    None => "unexpected end of input".to_string(),
                },
                Span::point(to_u32(pos)),
            ),
        };
        SyntaxError {
            code,
            message,
            span,
            expected,
            found,
        }
    }

    /// The start rule matched `0..pos` but input continues to `len`.
    #[cold]
    pub fn trailing(pos: usize, len: usize, found: Option<char>) -> Self {
        SyntaxError {
            code: ErrorCode::E1003,
            message: format!("unexpected input after a complete match, starting at offset {pos}"),
            span: Span::new(to_u32(pos), to_u32(len.max(pos))),
            expected: Vec::new(),
            found,
        }
    }

    /// Offset where matching stopped.
    #[inline]
    pub fn position(&self) -> usize {
        self.span.start as usize
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match (self.code, self.found) {
            (ErrorCode::E1003, _) => "not part of the match".to_string(),
            (_, Some(c)) => format!("unexpected {c:?}"),
            (_, None) => "input ends here".to_string(),
        };
        let diag = Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_label(self.span, label);
        if self.expected.len() > 1 {
            diag.with_note(format!("any of {} would continue the match", self.expected.len()))
        } else {
            diag
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} at {:?}", self.code, self.message, self.span)
    }
}

impl std::error::Error for SyntaxError {}

/// "`a`", "`a` or `b`", "one of `a`, `b`, `c`".
fn expected_list(names: &[String]) -> Option<String> {
    match names {
        [] => None,
        [one] => Some(format!("`{one}`")),
        [a, b] => Some(format!("`{a}` or `{b}`")),
        many => Some(format!(
            "one of {}",
            many.iter()
                .map(|n| format!("`{n}`"))
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

#[inline]
fn to_u32(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}
