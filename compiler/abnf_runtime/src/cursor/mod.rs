//! Input tokens and immutable positions into them.

use std::fmt;

use abnf_diagnostic::Span;
use tracing::trace;


/// Text decoded into the token sequence a parse runs over.
///
/// Tokens are Unicode scalar values. Positions and spans are token indices.
#[derive(Clone, PartialEq, Eq)]
pub struct Input {
    tokens: Vec<char>,
}

impl Input {
    pub fn new(text: &str) -> Self {
        Input {
            tokens: text.chars().collect(),
        }
    }

    /// Cursor at the first token.
    #[inline]
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.tokens)
    }

    #[inline]
    pub fn tokens(&self) -> &[char] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The text covered by `span`, clamped to the input.
    pub fn slice(&self, span: Span) -> String {
        let end = (span.end as usize).min(self.tokens.len());
        let start = (span.start as usize).min(end);
        self.tokens[start..end].iter().collect()
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.tokens.iter().collect();
        write!(f, "Input({text:?})")
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::new(text)
    }
}

/// Immutable position into a token sequence.
///
/// Advancing yields a new cursor; a cursor is never mutated in place, so a
/// node can keep the cursor it started at and the one it ended at without
/// either changing underneath it. Equality compares the token contents and
/// the position.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cursor<'src> {
    tokens: &'src [char],
    pos: usize,
}

impl<'src> Cursor<'src> {
    #[inline]
    pub fn new(tokens: &'src [char]) -> Self {
        Cursor { tokens, pos: 0 }
    }

    /// Cursor over the same tokens at `pos`, clamped to the end.
    #[inline]
    #[must_use]
    pub fn at(self, pos: usize) -> Self {
        Cursor {
            tokens: self.tokens,
            pos: pos.min(self.tokens.len()),
        }
    }

    #[inline]
    pub fn position(self) -> usize {
        self.pos
    }

    /// Token under the cursor, or `None` at the end of input.
    #[inline]
    pub fn current(self) -> Option<char> {
        self.tokens.get(self.pos).copied()
    }

    #[inline]
    pub fn is_at_end(self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The cursor one token further on.
    ///
    /// Advancing past the end is a caller bug; release builds stay at the end.
    #[inline]
    #[must_use]
    pub fn advance(self) -> Self {
        debug_assert!(!self.is_at_end(), "advance past end of input");
        let pos = (self.pos + 1).min(self.tokens.len());
        trace!(pos, "advance");
        Cursor {
            tokens: self.tokens,
            pos,
        }
    }

    /// The whole token sequence this cursor points into.
    #[inline]
    pub fn tokens(self) -> &'src [char] {
        self.tokens
    }

    /// Tokens from the cursor to the end.
    #[inline]
    pub fn remaining(self) -> &'src [char] {
        &self.tokens[self.pos..]
    }

    /// Tokens between this cursor and `end`.
    pub fn slice_to(self, end: Cursor<'src>) -> &'src [char] {
        let stop = end.pos.clamp(self.pos, self.tokens.len());
        &self.tokens[self.pos..stop]
    }

    /// Span from this cursor up to `end`.
    pub fn span_to(self, end: Cursor<'src>) -> Span {
        Span::new(to_u32(self.pos), to_u32(end.pos.max(self.pos)))
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({}/{})", self.pos, self.tokens.len())
    }
}

/// Span offsets are `u32`; inputs beyond that saturate.
#[inline]
fn to_u32(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}
